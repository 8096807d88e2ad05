// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Prism Forward Model Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Model description, run configuration, and error hierarchy for the
//! right-rectangular-prism gravity forward model.
//!
//! Everything in this crate is immutable input: prisms and the
//! observation grid are validated once at construction and never
//! mutated by the numerical crates downstream.

pub mod config;
pub mod error;
pub mod model;

pub use config::ForwardConfig;
pub use error::{GravGradError, GravGradResult};
pub use model::{Model, ObservationGrid, Prism};
