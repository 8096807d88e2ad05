// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Physical Constants and Numerical Thresholds
// ─────────────────────────────────────────────────────────────────────
//! Unit scale factors for lengths in km and densities in g/cc.
//!
//! The field and gradient constants differ by the extra inverse length
//! of a spatial derivative plus the step from mGal to Eotvos.

/// Magnitude below which a denominator or argument is treated as exactly
/// zero. Only guards exact-zero comparisons; it is not a tolerance.
pub const TINY: f64 = 1.0e-29;

/// Raw field sums → mGal.
pub const FIELD_SCALE_MGAL: f64 = -6.67408;

/// Raw gradient sums → Eotvos.
pub const GRADIENT_SCALE_EOTVOS: f64 = -66.73;

/// Full-turn angle used by the sign-limited arctangent branches.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Number of sides in a prism's y–z cross-section loop.
pub const EDGES_PER_PRISM: usize = 4;
