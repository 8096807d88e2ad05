// ─────────────────────────────────────────────────────────────────────
// Gravgrad — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the prism forward model.
//!
//! Exposes `ForwardConfig`, `RustForwardEngine`, `WetBulkDensity` and the
//! `compute_from_json` function.
//!
//! # FFI Safety
//!
//! - The GIL is released for the whole accumulation; no Python object is
//!   touched until the grids are complete.
//! - Every validation or numerical failure surfaces as `ValueError`.
//! - All config validated before storage (`ForwardConfig::validate()`).
//!
//! Install: `pip install -e crates/gravgrad-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from gravgrad import ForwardConfig, RustForwardEngine
//!
//! engine = RustForwardEngine(ForwardConfig(gradient_enabled=True))
//! out = engine.compute([(0, 1, 0, 1, 0, 1, 1.0)], [0.5], [0.5], -10.0)
//! out["gzz"][0][0]
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use gravgrad_core::{ForwardEngine, ForwardResult};
use gravgrad_physics::WetBulkDensity;
use gravgrad_types::{ForwardConfig, GravGradError, Model, ObservationGrid, Prism};

/// `(xmin, xmax, ymin, ymax, zmin, zmax, density_contrast)`
type PrismTuple = (f64, f64, f64, f64, f64, f64, f64);

fn to_py_err(e: GravGradError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn result_to_dict(result: &ForwardResult) -> PyResult<PyObject> {
    Python::with_gil(|py| {
        let dict = PyDict::new(py);
        for (channel, grid) in result.grids.iter() {
            dict.set_item(channel.name(), grid.rows())?;
        }
        dict.set_item("x", result.x_coords.clone())?;
        dict.set_item("y", result.y_coords.clone())?;
        dict.set_item("height", result.height)?;
        dict.set_item("elapsed_ms", result.elapsed_ms)?;
        Ok(dict.into())
    })
}

// ─── PyForwardConfig ────────────────────────────────────────────────

/// Python-visible forward run configuration.
#[pyclass(name = "ForwardConfig")]
#[derive(Clone)]
struct PyForwardConfig {
    inner: ForwardConfig,
}

#[pymethods]
impl PyForwardConfig {
    #[new]
    #[pyo3(signature = (
        gradient_enabled = false,
        remove_mean = false,
        parallel = true,
        num_threads = None,
    ))]
    fn new(
        gradient_enabled: bool,
        remove_mean: bool,
        parallel: bool,
        num_threads: Option<usize>,
    ) -> PyResult<Self> {
        let config = ForwardConfig {
            gradient_enabled,
            remove_mean,
            parallel,
            num_threads,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = ForwardConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn gradient_enabled(&self) -> bool {
        self.inner.gradient_enabled
    }

    #[getter]
    fn remove_mean(&self) -> bool {
        self.inner.remove_mean
    }

    #[getter]
    fn parallel(&self) -> bool {
        self.inner.parallel
    }

    #[getter]
    fn num_threads(&self) -> Option<usize> {
        self.inner.num_threads
    }

    fn __repr__(&self) -> String {
        format!(
            "ForwardConfig(gradient_enabled={}, remove_mean={}, parallel={})",
            self.inner.gradient_enabled, self.inner.remove_mean, self.inner.parallel
        )
    }
}

// ─── RustForwardEngine ──────────────────────────────────────────────

/// Prism forward model over a horizontal observation grid.
#[pyclass(name = "RustForwardEngine")]
struct PyForwardEngine {
    inner: ForwardEngine,
}

#[pymethods]
impl PyForwardEngine {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyForwardConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        Ok(Self {
            inner: ForwardEngine::new(cfg).map_err(to_py_err)?,
        })
    }

    /// Compute every channel on the `x_coords × y_coords` grid.
    ///
    /// Returns: dict of channel name → rows indexed `[ix][iy]`, plus
    /// `x`, `y`, `height`, `elapsed_ms`.
    fn compute(
        &self,
        py: Python<'_>,
        prisms: Vec<PrismTuple>,
        x_coords: Vec<f64>,
        y_coords: Vec<f64>,
        height: f64,
    ) -> PyResult<PyObject> {
        let prisms = prisms
            .into_iter()
            .enumerate()
            .map(|(i, (x0, x1, y0, y1, z0, z1, rho))| {
                Prism::new(x0, x1, y0, y1, z0, z1, rho)
                    .map_err(|e| PyValueError::new_err(format!("prism {i}: {e}")))
            })
            .collect::<PyResult<Vec<_>>>()?;
        let grid = ObservationGrid::new(x_coords, y_coords, height).map_err(to_py_err)?;
        let result = py
            .allow_threads(|| self.inner.run(&prisms, &grid))
            .map_err(to_py_err)?;
        result_to_dict(&result)
    }

    #[getter]
    fn gradient_enabled(&self) -> bool {
        self.inner.config().gradient_enabled
    }

    fn __repr__(&self) -> String {
        format!(
            "RustForwardEngine(gradient_enabled={}, remove_mean={})",
            self.inner.config().gradient_enabled,
            self.inner.config().remove_mean
        )
    }
}

/// Run a JSON model description (prisms, grid, optional config).
#[pyfunction]
fn compute_from_json(py: Python<'_>, model_json: &str) -> PyResult<PyObject> {
    let model = Model::from_json(model_json).map_err(to_py_err)?;
    let result = py
        .allow_threads(|| ForwardEngine::run_model(&model))
        .map_err(to_py_err)?;
    result_to_dict(&result)
}

// ─── WetBulkDensity ─────────────────────────────────────────────────

/// Bulk density and time-lapse density contrast from saturations.
#[pyclass(name = "WetBulkDensity")]
struct PyWetBulkDensity {
    inner: WetBulkDensity,
}

#[pymethods]
impl PyWetBulkDensity {
    #[new]
    fn new(porosity: f64, brine_density: f64) -> PyResult<Self> {
        Ok(Self {
            inner: WetBulkDensity::new(porosity, brine_density).map_err(to_py_err)?,
        })
    }

    fn single_time(
        &self,
        rock_density: f64,
        brine_saturation: f64,
        co2_density: f64,
        co2_saturation: f64,
    ) -> f64 {
        self.inner
            .single_time(rock_density, brine_saturation, co2_density, co2_saturation)
    }

    fn time_lapse_contrast(
        &self,
        co2_saturation: f64,
        baseline_co2_saturation: f64,
        co2_density: f64,
    ) -> f64 {
        self.inner
            .time_lapse_contrast(co2_saturation, baseline_co2_saturation, co2_density)
    }

    #[getter]
    fn porosity(&self) -> f64 {
        self.inner.porosity
    }

    #[getter]
    fn brine_density(&self) -> f64 {
        self.inner.brine_density
    }

    fn __repr__(&self) -> String {
        format!(
            "WetBulkDensity(porosity={}, brine_density={})",
            self.inner.porosity, self.inner.brine_density
        )
    }
}

// ─── Module Registration ────────────────────────────────────────────

/// Gravgrad — closed-form prism gravity and gravity gradients.
///
/// - `ForwardConfig` — run configuration
/// - `RustForwardEngine` — grid forward model
/// - `compute_from_json` — one-shot run of a JSON model
/// - `WetBulkDensity` — density contrast helpers
#[pymodule]
fn gravgrad(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyForwardConfig>()?;
    m.add_class::<PyForwardEngine>()?;
    m.add_class::<PyWetBulkDensity>()?;
    m.add_function(wrap_pyfunction!(compute_from_json, m)?)?;
    Ok(())
}
