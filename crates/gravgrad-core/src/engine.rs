// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Forward Engine (Run Orchestrator)
// ─────────────────────────────────────────────────────────────────────
//! One forward run:
//!   1. Validate prisms and grid
//!   2. Accumulate every prism at every observation point
//!   3. Scale to mGal / Eotvos and derive gxx
//!   4. Optionally remove each channel's mean
//!   5. Package grids with coordinates and timing

use std::time::Instant;

use gravgrad_physics::{remove_means, FieldAccumulator};
use gravgrad_types::{ForwardConfig, GravGradResult, Model, ObservationGrid, Prism};

use crate::result::ForwardResult;

/// Forward modelling engine. Stateless between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardEngine {
    config: ForwardConfig,
}

impl ForwardEngine {
    pub fn new(config: ForwardConfig) -> GravGradResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Field-only, parallel, no mean removal.
    pub fn default_params() -> Self {
        Self {
            config: ForwardConfig::default(),
        }
    }

    pub fn config(&self) -> &ForwardConfig {
        &self.config
    }

    pub fn run(&self, prisms: &[Prism], grid: &ObservationGrid) -> GravGradResult<ForwardResult> {
        let start = Instant::now();
        log::info!(
            "forward run: {} prisms, {}x{} grid at height {}, gradient={}",
            prisms.len(),
            grid.nx(),
            grid.ny(),
            grid.height(),
            self.config.gradient_enabled
        );

        let accumulator = FieldAccumulator::from_config(&self.config);
        let mut grids = accumulator.accumulate(prisms, grid)?;
        log::debug!("accumulate: {:.3} ms", start.elapsed().as_secs_f64() * 1e3);

        let removed_means = if self.config.remove_mean {
            let t = Instant::now();
            let means = remove_means(&mut grids);
            log::debug!("mean removal: {:.3} ms", t.elapsed().as_secs_f64() * 1e3);
            means
        } else {
            Vec::new()
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        log::info!("forward run complete in {elapsed_ms:.3} ms");

        Ok(ForwardResult {
            grids,
            x_coords: grid.x_coords().to_vec(),
            y_coords: grid.y_coords().to_vec(),
            height: grid.height(),
            config: self.config.clone(),
            removed_means,
            elapsed_ms,
        })
    }

    /// Run a self-contained model with its own configuration.
    pub fn run_model(model: &Model) -> GravGradResult<ForwardResult> {
        model.validate()?;
        Self::new(model.config.clone())?.run(&model.prisms, &model.grid)
    }
}
