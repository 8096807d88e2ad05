// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Prism Gravity Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Closed-form gravity field and gravity-gradient tensor of right
//! rectangular prisms: singular-safe primitives, the per-edge line
//! integral, superposition over an observation grid, and mean removal.

pub mod accumulator;
pub mod density;
pub mod edge;
pub mod grids;
pub mod kernel;
pub mod params;
pub mod postprocess;
pub mod primitives;

pub use accumulator::FieldAccumulator;
pub use density::WetBulkDensity;
pub use grids::{Channel, Grid2, OutputGrids};
pub use kernel::{Contribution, PrismSource};
pub use params::{FIELD_SCALE_MGAL, GRADIENT_SCALE_EOTVOS, TINY};
pub use postprocess::{remove_mean, remove_means};
