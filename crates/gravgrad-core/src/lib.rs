// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Forward Model Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Forward gravity modelling of prism assemblages over a horizontal
//! observation grid.
//!
//! # Invariants
//!
//! 1. **Inputs are validated before any arithmetic**: an empty prism list,
//!    inverted bounds, or a non-finite coordinate is rejected with
//!    `GravGradError::Validation` and no grid is produced.
//!
//! 2. **Outputs are finite**: the kernel's singularity branches keep every
//!    cell finite, including observers on prism vertices, edges, and faces.
//!    A non-finite cell aborts the run with `GravGradError::Numerical`.
//!
//! 3. **Parallelism does not change results**: workers own disjoint
//!    observation points and each point is summed in model order.
//!
//! 4. **Mean removal runs once on the complete superposition**, never on
//!    partial sums.

pub mod engine;
pub mod result;

pub use engine::ForwardEngine;
pub use result::{ForwardResult, PointRecord};
