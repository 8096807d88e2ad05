// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Wet Bulk Density
// ─────────────────────────────────────────────────────────────────────
//! Density contrasts for CO₂ storage monitoring, derived from pore-fluid
//! saturations. Densities in g/cc, porosity and saturations as fractions.

use serde::{Deserialize, Serialize};

use gravgrad_types::{GravGradError, GravGradResult};

/// Pore-space properties of one reservoir cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WetBulkDensity {
    pub porosity: f64,
    pub brine_density: f64,
}

impl WetBulkDensity {
    pub fn new(porosity: f64, brine_density: f64) -> GravGradResult<Self> {
        let wbd = Self {
            porosity,
            brine_density,
        };
        wbd.validate()?;
        Ok(wbd)
    }

    pub fn validate(&self) -> GravGradResult<()> {
        if !(0.0..=1.0).contains(&self.porosity) {
            return Err(GravGradError::Validation(format!(
                "porosity must be in [0, 1], got {}",
                self.porosity
            )));
        }
        if !self.brine_density.is_finite() {
            return Err(GravGradError::Validation(format!(
                "brine density must be finite, got {}",
                self.brine_density
            )));
        }
        Ok(())
    }

    /// Bulk density at one time step:
    /// `(1 − φ)·ρ_rock + φ·S_brine·ρ_brine + φ·S_co2·ρ_co2`.
    pub fn single_time(
        &self,
        rock_density: f64,
        brine_saturation: f64,
        co2_density: f64,
        co2_saturation: f64,
    ) -> f64 {
        let phi = self.porosity;
        (1.0 - phi) * rock_density
            + phi * brine_saturation * self.brine_density
            + phi * co2_density * co2_saturation
    }

    /// Change in bulk density since a baseline survey, as CO₂ displaces
    /// brine. This is the contrast assigned to a prism for time-lapse runs.
    pub fn time_lapse_contrast(
        &self,
        co2_saturation: f64,
        baseline_co2_saturation: f64,
        co2_density: f64,
    ) -> f64 {
        (co2_saturation - baseline_co2_saturation)
            * self.porosity
            * (co2_density - self.brine_density)
    }
}
