// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Forward Run Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{GravGradError, GravGradResult};

/// Mode flags and execution settings for one forward run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Compute the gradient tensor channels in addition to `gz`/`gy`.
    /// Default: false.
    pub gradient_enabled: bool,

    /// Subtract each channel's arithmetic mean after superposition.
    /// Default: false.
    pub remove_mean: bool,

    /// Spread observation points over a rayon worker pool.
    /// Default: true.
    pub parallel: bool,

    /// Size of a dedicated worker pool; `None` uses the global pool.
    /// Ignored when `parallel` is false.
    pub num_threads: Option<usize>,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            gradient_enabled: false,
            remove_mean: false,
            parallel: true,
            num_threads: None,
        }
    }
}

impl ForwardConfig {
    /// Field-only configuration (`gz`, `gy`).
    pub fn field_only() -> Self {
        Self::default()
    }

    /// Field plus full gradient tensor.
    pub fn with_gradient() -> Self {
        Self {
            gradient_enabled: true,
            ..Self::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> GravGradResult<()> {
        if self.num_threads == Some(0) {
            return Err(GravGradError::Config(
                "num_threads must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> GravGradResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GravGradError::Config(format!("JSON parse error: {e}")))
    }

    /// Number of output channels this configuration produces.
    pub fn channel_count(&self) -> usize {
        if self.gradient_enabled {
            8
        } else {
            2
        }
    }
}
