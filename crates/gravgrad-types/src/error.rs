// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all forward-model failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GravGradError {
    /// Malformed prism bounds, empty model, empty grid, non-finite input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error (bad values or unparsable JSON).
    #[error("config error: {0}")]
    Config(String),

    /// A non-finite value escaped the kernel. Indicates a missed
    /// singularity branch, never a property of the input.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Raw data does not match the grid shape it is meant to fill.
    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

pub type GravGradResult<T> = Result<T, GravGradError>;
