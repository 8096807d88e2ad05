// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Forward Run Result
// ─────────────────────────────────────────────────────────────────────

use serde::Serialize;

use gravgrad_physics::{Channel, Grid2, OutputGrids};
use gravgrad_types::{ForwardConfig, GravGradError, GravGradResult};

/// Output grids of one run plus the metadata needed to report them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardResult {
    pub grids: OutputGrids,
    pub x_coords: Vec<f64>,
    pub y_coords: Vec<f64>,
    pub height: f64,
    pub config: ForwardConfig,
    /// Means subtracted per channel; empty when mean removal is off.
    pub removed_means: Vec<(Channel, f64)>,
    pub elapsed_ms: f64,
}

/// All channel values at one observation point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub values: Vec<(Channel, f64)>,
}

impl ForwardResult {
    pub fn channel(&self, channel: Channel) -> Option<&Grid2> {
        self.grids.get(channel)
    }

    pub fn nx(&self) -> usize {
        self.x_coords.len()
    }

    pub fn ny(&self) -> usize {
        self.y_coords.len()
    }

    /// Per-point records, x outer and y inner.
    pub fn records(&self) -> Vec<PointRecord> {
        let mut out = Vec::with_capacity(self.nx() * self.ny());
        for (ix, &x) in self.x_coords.iter().enumerate() {
            for (iy, &y) in self.y_coords.iter().enumerate() {
                out.push(PointRecord {
                    x,
                    y,
                    values: self.grids.values_at(ix, iy),
                });
            }
        }
        out
    }

    /// Mean removed from `channel`, or 0 when none was.
    pub fn removed_mean(&self, channel: Channel) -> f64 {
        self.removed_means
            .iter()
            .find(|(c, _)| *c == channel)
            .map_or(0.0, |(_, m)| *m)
    }

    pub fn to_json(&self) -> GravGradResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GravGradError::Config(format!("JSON serialise error: {e}")))
    }
}
