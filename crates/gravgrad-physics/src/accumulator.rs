// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Field Accumulator
// ─────────────────────────────────────────────────────────────────────
//! Superposition of every prism at every observation point.
//!
//! Work is partitioned over observation points: each cell is an
//! independent sum over prisms, so worker threads own disjoint cells and
//! never synchronise. Within a cell the order is fixed (prisms in model
//! order, edges in loop order), which makes the serial and parallel paths
//! bit-identical.

use rayon::prelude::*;

use gravgrad_types::model::validate_prisms;
use gravgrad_types::{ForwardConfig, GravGradError, GravGradResult, ObservationGrid, Prism};

use crate::grids::{Channel, OutputGrids};
use crate::kernel::{Contribution, PrismSource};
use crate::params::{FIELD_SCALE_MGAL, GRADIENT_SCALE_EOTVOS};

/// Drives the prism × observation-point summation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccumulator {
    gradient_enabled: bool,
    parallel: bool,
    num_threads: Option<usize>,
}

impl FieldAccumulator {
    /// Serial accumulator.
    pub fn new(gradient_enabled: bool) -> Self {
        Self {
            gradient_enabled,
            parallel: false,
            num_threads: None,
        }
    }

    pub fn from_config(config: &ForwardConfig) -> Self {
        Self {
            gradient_enabled: config.gradient_enabled,
            parallel: config.parallel,
            num_threads: config.num_threads,
        }
    }

    pub fn with_parallel(mut self, parallel: bool, num_threads: Option<usize>) -> Self {
        self.parallel = parallel;
        self.num_threads = num_threads;
        self
    }

    pub fn gradient_enabled(&self) -> bool {
        self.gradient_enabled
    }

    /// Scaled output grids (mGal / Eotvos) with `gxx` derived.
    pub fn accumulate(
        &self,
        prisms: &[Prism],
        grid: &ObservationGrid,
    ) -> GravGradResult<OutputGrids> {
        validate_prisms(prisms)?;
        grid.validate()?;
        if self.num_threads == Some(0) {
            return Err(GravGradError::Config(
                "num_threads must be >= 1 when set".to_string(),
            ));
        }

        let sources: Vec<PrismSource> = prisms.iter().map(PrismSource::new).collect();
        warn_points_inside(prisms, grid);

        log::debug!(
            "accumulating {} prisms over {}x{} points (gradient={}, parallel={})",
            sources.len(),
            grid.nx(),
            grid.ny(),
            self.gradient_enabled,
            self.parallel
        );

        let raw = self.raw_sums(&sources, grid)?;
        let grids = finalise(&raw, grid.nx(), grid.ny(), self.gradient_enabled);
        check_finite(&grids)?;
        Ok(grids)
    }

    /// Density-weighted, unscaled sums per observation point, x-major.
    pub fn raw_sums(
        &self,
        sources: &[PrismSource],
        grid: &ObservationGrid,
    ) -> GravGradResult<Vec<Contribution>> {
        let ny = grid.ny();
        let n = grid.len();
        let gradient = self.gradient_enabled;
        let eval = |i: usize| point_sum(sources, grid.point(i / ny, i % ny), gradient);

        if !self.parallel {
            return Ok((0..n).map(eval).collect());
        }
        match self.num_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| GravGradError::Config(format!("thread pool: {e}")))?;
                log::debug!("running on dedicated pool of {threads} threads");
                Ok(pool.install(|| (0..n).into_par_iter().map(&eval).collect()))
            }
            None => Ok((0..n).into_par_iter().map(&eval).collect()),
        }
    }
}

/// Sum of every source at one point, in source order.
#[inline]
pub fn point_sum(sources: &[PrismSource], point: [f64; 3], gradient: bool) -> Contribution {
    let mut total = Contribution::default();
    for source in sources {
        total += source.evaluate(point, gradient);
    }
    total
}

/// Apply the unit scales and derive `gxx`.
pub fn finalise(raw: &[Contribution], nx: usize, ny: usize, gradient: bool) -> OutputGrids {
    let mut grids = OutputGrids::zeros(nx, ny, gradient);
    for (channel, grid) in grids.iter_mut() {
        let pick: fn(&Contribution) -> f64 = match channel {
            Channel::Gz => |c| c.gz * FIELD_SCALE_MGAL,
            Channel::Gy => |c| c.gy * FIELD_SCALE_MGAL,
            Channel::Gzx => |c| c.gzx * GRADIENT_SCALE_EOTVOS,
            Channel::Gzy => |c| c.gzy * GRADIENT_SCALE_EOTVOS,
            Channel::Gzz => |c| c.gzz * GRADIENT_SCALE_EOTVOS,
            Channel::Gyx => |c| c.gyx * GRADIENT_SCALE_EOTVOS,
            Channel::Gyy => |c| c.gyy * GRADIENT_SCALE_EOTVOS,
            Channel::Gxx => continue,
        };
        for (cell, c) in grid.as_mut_slice().iter_mut().zip(raw) {
            *cell = pick(c);
        }
    }
    derive_gxx(&mut grids);
    grids
}

/// `gxx = −(gyy + gzz)`: the tensor is traceless outside the sources.
/// No-op in field-only mode.
pub fn derive_gxx(grids: &mut OutputGrids) {
    let derived: Vec<f64> = match (grids.get(Channel::Gyy), grids.get(Channel::Gzz)) {
        (Some(gyy), Some(gzz)) => gyy
            .as_slice()
            .iter()
            .zip(gzz.as_slice())
            .map(|(yy, zz)| -(yy + zz))
            .collect(),
        _ => return,
    };
    if let Some(gxx) = grids.get_mut(Channel::Gxx) {
        gxx.as_mut_slice().copy_from_slice(&derived);
    }
}

fn check_finite(grids: &OutputGrids) -> GravGradResult<()> {
    for (channel, grid) in grids.iter() {
        if let Some((ix, iy, value)) = grid.first_non_finite() {
            log::error!("{channel} is non-finite at [{ix}, {iy}]: missed singularity branch");
            return Err(GravGradError::Numerical(format!(
                "{channel} = {value} at cell [{ix}, {iy}]"
            )));
        }
    }
    Ok(())
}

fn warn_points_inside(prisms: &[Prism], grid: &ObservationGrid) {
    let z = grid.height();
    let inside = grid
        .x_coords()
        .iter()
        .flat_map(|&x| grid.y_coords().iter().map(move |&y| (x, y)))
        .filter(|&(x, y)| prisms.iter().any(|p| p.contains(x, y, z)))
        .count();
    if inside > 0 {
        log::warn!(
            "{inside} observation point(s) lie inside or on a prism; \
             the gradient trace identity does not hold there"
        );
    }
}
