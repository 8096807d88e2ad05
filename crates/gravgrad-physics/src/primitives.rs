// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Edge-Integral Primitives
// ─────────────────────────────────────────────────────────────────────
//! Closed-form antiderivative terms evaluated at one corner of a rotated
//! edge (one x-bound × one edge endpoint).
//!
//! Local frame: `x` along the prism's x axis (relative to the observer),
//! `v` along the edge, `w` perpendicular to it, `r = √(x² + v² + w²)`.
//!
//! - `t1`, `t2`, `t3` — field terms.
//! - `t1x`..`t3x` — derivative along x.
//! - `t1y`..`t3y`, `t1z`..`t3z` — derivatives along y and z, projected back
//!   out of the rotated frame through `cose`/`sine`.
//!
//! Every term has removable singularities (0/0, log 0) where the observer
//! sits on an edge, its extension, or a vertex. Each one is caught by an
//! explicit branch that returns the limiting value, so no primitive ever
//! produces NaN or ±∞ for geometrically consistent arguments. Branch order
//! matters and is part of the contract.

use crate::params::{TINY, TWO_PI};

/// Exact-zero guard for denominators and log arguments.
#[inline(always)]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < TINY
}

/// Both arguments at the on-axis limit.
#[inline(always)]
fn both_near_zero(a: f64, b: f64) -> bool {
    is_near_zero(a) && is_near_zero(b)
}

/// Distance from the observer to the corner `(x, v, w)`.
#[inline(always)]
pub fn radius(x: f64, v: f64, w: f64) -> f64 {
    (x * x + v * v + w * w).sqrt()
}

/// Shared numerator `q = x² + x·r + w²` of the arctangent terms.
#[inline(always)]
pub fn q_term(x: f64, r: f64, w: f64) -> f64 {
    x * x + x * r + w * w
}

// ── Field terms ──────────────────────────────────────────────────────

/// `v·ln(x + r)`; zero where the log argument is not positive.
#[inline]
pub fn t1(x: f64, v: f64, r: f64) -> f64 {
    if x + r > 0.0 {
        v * (x + r).ln()
    } else {
        0.0
    }
}

/// `x·ln(r + v)`; zero where the log argument is not positive.
#[inline]
pub fn t2(x: f64, v: f64, r: f64) -> f64 {
    if r + v > 0.0 {
        x * (r + v).ln()
    } else {
        0.0
    }
}

/// Solid-angle term `−w·atan((x² + x·r + w²)/(v·w))`.
///
/// On the edge line (`w → 0`) the term vanishes; when `v → 0` the
/// arctangent saturates and only the sign of its argument survives.
#[inline]
pub fn t3(x: f64, v: f64, w: f64, r: f64) -> f64 {
    if is_near_zero(w) {
        0.0
    } else if is_near_zero(v) {
        let arg = (x * r + w * w + x * x) / w;
        if is_near_zero(arg) {
            -w * TWO_PI
        } else {
            -w * TWO_PI * arg.signum()
        }
    } else {
        let arg = (x * x + x * r + w * w) / (v * w);
        -w * arg.atan()
    }
}

// ── x-derivative terms ───────────────────────────────────────────────

#[inline]
pub fn t1x(v: f64, r: f64) -> f64 {
    if both_near_zero(v, r) {
        1.0
    } else {
        -v / r
    }
}

#[inline]
pub fn t2x(x: f64, v: f64, r: f64) -> f64 {
    let vr = v + r;
    if both_near_zero(v, r) || is_near_zero(vr) {
        -1.0
    } else if vr < 0.0 {
        -x * x / (r * vr)
    } else {
        -(vr.ln() + x * x / (r * vr))
    }
}

#[inline]
pub fn t3x(q: f64, x: f64, r: f64, v: f64, w: f64) -> f64 {
    if is_near_zero(w) || is_near_zero(v) {
        0.0
    } else {
        v * w * w * ((2.0 * x * r + x * x + r * r) / r) / (q * q + v * v * w * w)
    }
}

// ── y-derivative terms ───────────────────────────────────────────────

#[inline]
pub fn t1y(x: f64, y: f64, v: f64, r: f64, cose: f64) -> f64 {
    if both_near_zero(x, r) {
        -cose
    } else if is_near_zero(x + r) {
        0.0
    } else {
        -(cose * (x + r).ln() + (v * y) / (r * (x + r)))
    }
}

#[inline]
pub fn t2y(x: f64, y: f64, v: f64, r: f64, cose: f64) -> f64 {
    if both_near_zero(v, r) {
        -cose
    } else if is_near_zero(v + r) {
        0.0
    } else {
        -(cose + y / r) * (x / (v + r))
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
pub fn t3y(q: f64, x: f64, y: f64, r: f64, v: f64, w: f64, cose: f64, sine: f64) -> f64 {
    let w0 = is_near_zero(w);
    let v0 = is_near_zero(v);
    let q0 = is_near_zero(q);
    if w0 && v0 && q0 {
        -sine * TWO_PI
    } else if w0 && v0 {
        -sine * TWO_PI * q.signum()
    } else if w0 && q0 {
        0.0
    } else if w0 {
        -sine * TWO_PI * (q / v).signum()
    } else if v0 {
        -sine * TWO_PI * (q / w).signum() - w * w * cose / q
    } else {
        -sine * (q / (v * w)).atan()
            + w * (v * w * x * y / r + v * sine * (q - 2.0 * w * w) - w * q * cose)
                / (q * q + v * v * w * w)
    }
}

// ── z-derivative terms ───────────────────────────────────────────────

#[inline]
pub fn t1z(x: f64, v: f64, z: f64, r: f64, sine: f64) -> f64 {
    if x > 0.0 && r > 0.0 {
        -(sine * (x + r).ln() + v * z / (r * (x + r)))
    } else if both_near_zero(x, r) {
        sine
    } else if is_near_zero(x + r) {
        0.0
    } else {
        -(sine * (x + r).ln() + v * z / (r * (x + r)))
    }
}

#[inline]
pub fn t2z(x: f64, v: f64, z: f64, r: f64, sine: f64) -> f64 {
    if v > 0.0 && r > 0.0 {
        -(sine + z / r) * (x / (v + r))
    } else if both_near_zero(v, r) {
        -sine
    } else if is_near_zero(v + r) {
        0.0
    } else {
        -(sine + z / r) * (x / (v + r))
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
pub fn t3z(q: f64, x: f64, z: f64, r: f64, v: f64, w: f64, cose: f64, sine: f64) -> f64 {
    let w0 = is_near_zero(w);
    let v0 = is_near_zero(v);
    let q0 = is_near_zero(q);
    if w0 && v0 && q0 {
        cose * TWO_PI
    } else if w0 && v0 {
        cose * TWO_PI * q.signum()
    } else if w0 && q0 {
        0.0
    } else if w0 {
        cose * TWO_PI * (q / v).signum()
    } else if v0 {
        cose * TWO_PI * (q / w).signum() - w * w * sine / q
    } else {
        cose * (q / (v * w)).atan()
            + w * (v * w * x * z / r - v * cose * (q - 2.0 * w * w) - q * w * sine)
                / (q * q + v * v * w * w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{LN_2, PI};

    const COSE: f64 = 0.6;
    const SINE: f64 = 0.8;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * (1.0 + b.abs())
    }

    macro_rules! assert_close {
        ($got:expr, $want:expr) => {{
            let (got, want) = ($got, $want);
            assert!(close(got, want), "got {got}, want {want}");
        }};
    }

    #[test]
    fn test_near_zero_boundary() {
        assert!(is_near_zero(0.0));
        assert!(is_near_zero(-0.0));
        assert!(is_near_zero(9.9e-30));
        assert!(is_near_zero(-9.9e-30));
        assert!(!is_near_zero(TINY));
        assert!(!is_near_zero(1e-20));
        assert!(!is_near_zero(f64::NAN));
    }

    #[test]
    fn test_radius_and_q() {
        assert_close!(radius(1.0, 2.0, 2.0), 3.0);
        assert_close!(q_term(1.0, 3.0, 2.0), 8.0);
        // q ≥ w² for consistent radii
        let r = radius(-5.0, 0.0, 0.5);
        assert!(q_term(-5.0, r, 0.5) > 0.0);
    }

    #[test]
    fn test_t1_branches() {
        assert_close!(t1(2.0, 3.0, 1.0), 3.0 * 3.0_f64.ln());
        assert_eq!(t1(-1.0, 5.0, 1.0), 0.0);
        assert_eq!(t1(-2.0, 5.0, 1.0), 0.0);
    }

    #[test]
    fn test_t2_branches() {
        assert_close!(t2(2.0, 3.0, 1.0), 2.0 * 4.0_f64.ln());
        assert_eq!(t2(7.0, -1.0, 1.0), 0.0);
    }

    #[test]
    fn test_t3_on_edge_line_vanishes() {
        assert_eq!(t3(1.0, 2.0, 0.0, 3.0), 0.0);
        assert_eq!(t3(1.0, 0.0, 5e-30, 3.0), 0.0);
    }

    #[test]
    fn test_t3_sign_limited_branch() {
        let r = radius(1.0, 0.0, 1.0);
        let expected = -2.0 * PI;
        assert_close!(t3(1.0, 0.0, 1.0, r), expected);
        // w < 0 flips both the prefactor and the sign of the argument
        assert_close!(t3(1.0, 0.0, -1.0, r), expected);
    }

    #[test]
    fn test_t3_zero_argument_branch() {
        // x·r + x² cancels exactly, leaving arg = w ≈ 0 numerically
        let w = 1e-20;
        assert_close!(t3(-1.0, 0.0, w, 1.0), -w * TWO_PI);
    }

    #[test]
    fn test_t3_general() {
        let r = 3.0_f64.sqrt();
        // atan(2 + √3) = 5π/12
        assert_close!(t3(1.0, 1.0, 1.0, r), -5.0 * PI / 12.0);
    }

    #[test]
    fn test_t1x_branches() {
        assert_eq!(t1x(0.0, 0.0), 1.0);
        assert_close!(t1x(3.0, 5.0), -0.6);
    }

    #[test]
    fn test_t2x_branches() {
        assert_eq!(t2x(4.0, 0.0, 0.0), -1.0);
        assert_eq!(t2x(4.0, -2.0, 2.0), -1.0);
        assert_close!(t2x(1.0, -3.0, 2.0), 0.5);
        assert_close!(t2x(1.0, 1.0, 1.0), -(LN_2 + 0.5));
    }

    #[test]
    fn test_t3x_branches() {
        assert_eq!(t3x(1.0, 1.0, 1.0, 1.0, 0.0), 0.0);
        assert_eq!(t3x(1.0, 1.0, 1.0, 0.0, 1.0), 0.0);
        assert_close!(t3x(1.0, 1.0, 1.0, 1.0, 1.0), 2.0);
    }

    #[test]
    fn test_t1y_branches() {
        assert_eq!(t1y(0.0, 1.0, 1.0, 0.0, COSE), -COSE);
        assert_eq!(t1y(-2.0, 1.0, 1.0, 2.0, COSE), 0.0);
        assert_close!(t1y(1.0, 2.0, 3.0, 1.0, COSE), -(COSE * LN_2 + 3.0));
    }

    #[test]
    fn test_t2y_branches() {
        assert_eq!(t2y(1.0, 1.0, 0.0, 0.0, COSE), -COSE);
        assert_eq!(t2y(1.0, 1.0, -2.0, 2.0, COSE), 0.0);
        assert_close!(t2y(1.0, 2.0, 1.0, 1.0, COSE), -1.3);
    }

    #[test]
    fn test_t3y_branches() {
        // all of w, v, q at zero
        assert_close!(t3y(0.0, 1.0, 1.0, 1.0, 0.0, 0.0, COSE, SINE), -SINE * TWO_PI);
        // w, v at zero: sign of q
        assert_close!(t3y(-3.0, 1.0, 1.0, 1.0, 0.0, 0.0, COSE, SINE), SINE * TWO_PI);
        assert_close!(t3y(3.0, 1.0, 1.0, 1.0, 0.0, 0.0, COSE, SINE), -SINE * TWO_PI);
        // w, q at zero
        assert_eq!(t3y(0.0, 1.0, 1.0, 1.0, 1.0, 0.0, COSE, SINE), 0.0);
        // w at zero: sign of q/v
        assert_close!(t3y(2.0, 1.0, 1.0, 1.0, -1.0, 0.0, COSE, SINE), SINE * TWO_PI);
        // v at zero: sign of q/w plus rational correction
        assert_close!(
            t3y(4.0, 1.0, 1.0, 1.0, 0.0, 2.0, COSE, SINE),
            -SINE * TWO_PI - COSE
        );
        // general
        assert_close!(
            t3y(1.0, 1.0, 1.0, 1.0, 1.0, 1.0, COSE, SINE),
            -0.2 * PI - 0.2
        );
    }

    #[test]
    fn test_t1z_branches() {
        assert_close!(t1z(1.0, 2.0, 3.0, 1.0, SINE), -(SINE * LN_2 + 3.0));
        assert_eq!(t1z(0.0, 2.0, 3.0, 0.0, SINE), SINE);
        assert_eq!(t1z(-2.0, 2.0, 3.0, 2.0, SINE), 0.0);
        // x < 0 but x + r > 0 falls through to the general form
        assert_close!(t1z(-1.0, 2.0, 3.0, 2.0, SINE), -3.0);
    }

    #[test]
    fn test_t2z_branches() {
        assert_close!(t2z(1.0, 1.0, 2.0, 1.0, SINE), -1.4);
        assert_eq!(t2z(1.0, 0.0, 2.0, 0.0, SINE), -SINE);
        assert_eq!(t2z(1.0, -2.0, 2.0, 2.0, SINE), 0.0);
        assert_close!(t2z(1.0, -1.0, 2.0, 2.0, SINE), -1.8);
    }

    #[test]
    fn test_t3z_branches() {
        assert_close!(t3z(0.0, 1.0, 1.0, 1.0, 0.0, 0.0, COSE, SINE), COSE * TWO_PI);
        assert_close!(t3z(-3.0, 1.0, 1.0, 1.0, 0.0, 0.0, COSE, SINE), -COSE * TWO_PI);
        assert_eq!(t3z(0.0, 1.0, 1.0, 1.0, 1.0, 0.0, COSE, SINE), 0.0);
        assert_close!(t3z(2.0, 1.0, 1.0, 1.0, -1.0, 0.0, COSE, SINE), -COSE * TWO_PI);
        assert_close!(
            t3z(4.0, 1.0, 1.0, 1.0, 0.0, 2.0, COSE, SINE),
            COSE * TWO_PI - SINE
        );
        assert_close!(
            t3z(1.0, 1.0, 1.0, 1.0, 1.0, 1.0, COSE, SINE),
            0.15 * PI + 0.4
        );
    }

    /// Sweep corners built from consistent (x, v, w) triples, including the
    /// exact zeros and sub-threshold values that drive the singular branches.
    #[test]
    fn test_all_primitives_finite_on_degenerate_corners() {
        let samples = [-2.0, -1.0, -1e-31, 0.0, 1e-31, 0.5, 1.0, 3.0];
        let frames = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        for &x in &samples {
            for &v in &samples {
                for &w in &samples {
                    let r = radius(x, v, w);
                    let q = q_term(x, r, w);
                    for &(cose, sine) in &frames {
                        let y = v * cose - w * sine;
                        let z = v * sine + w * cose;
                        let values = [
                            t1(x, v, r),
                            t2(x, v, r),
                            t3(x, v, w, r),
                            t1x(v, r),
                            t2x(x, v, r),
                            t3x(q, x, r, v, w),
                            t1y(x, y, v, r, cose),
                            t2y(x, y, v, r, cose),
                            t3y(q, x, y, r, v, w, cose, sine),
                            t1z(x, v, z, r, sine),
                            t2z(x, v, z, r, sine),
                            t3z(q, x, z, r, v, w, cose, sine),
                        ];
                        for (i, val) in values.iter().enumerate() {
                            assert!(
                                val.is_finite(),
                                "primitive #{i} non-finite at x={x}, v={v}, w={w}: {val}"
                            );
                        }
                    }
                }
            }
        }
    }
}
