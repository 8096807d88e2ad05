// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Prism Model and Observation Grid
// ─────────────────────────────────────────────────────────────────────
//! Immutable geometry of a forward run.
//!
//! Lengths share one unit (km for the reference unit constants), z is
//! depth positive downward, densities are contrasts in g/cc. Nothing
//! here converts units; the loader hands over consistently scaled data.

use serde::{Deserialize, Serialize};

use crate::config::ForwardConfig;
use crate::error::{GravGradError, GravGradResult};

fn check_finite(label: &str, value: f64) -> GravGradResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GravGradError::Validation(format!(
            "{label} must be finite, got {value}"
        )))
    }
}

fn check_ordered(axis: &str, lo: f64, hi: f64) -> GravGradResult<()> {
    check_finite(&format!("{axis}min"), lo)?;
    check_finite(&format!("{axis}max"), hi)?;
    if lo < hi {
        Ok(())
    } else {
        Err(GravGradError::Validation(format!(
            "{axis}min must be < {axis}max, got [{lo}, {hi}]"
        )))
    }
}

/// Axis-aligned right rectangular prism with a density contrast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    zmin: f64,
    zmax: f64,
    density_contrast: f64,
}

impl Prism {
    pub fn new(
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        zmin: f64,
        zmax: f64,
        density_contrast: f64,
    ) -> GravGradResult<Self> {
        let prism = Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            density_contrast,
        };
        prism.validate()?;
        Ok(prism)
    }

    /// Strict per-axis ordering and finite values.
    pub fn validate(&self) -> GravGradResult<()> {
        check_ordered("x", self.xmin, self.xmax)?;
        check_ordered("y", self.ymin, self.ymax)?;
        check_ordered("z", self.zmin, self.zmax)?;
        check_finite("density_contrast", self.density_contrast)
    }

    /// Same geometry, different density contrast.
    pub fn with_density(&self, density_contrast: f64) -> GravGradResult<Self> {
        check_finite("density_contrast", density_contrast)?;
        Ok(Self {
            density_contrast,
            ..*self
        })
    }

    #[inline]
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.xmin, self.xmax)
    }

    #[inline]
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.ymin, self.ymax)
    }

    #[inline]
    pub fn z_bounds(&self) -> (f64, f64) {
        (self.zmin, self.zmax)
    }

    #[inline]
    pub fn density_contrast(&self) -> f64 {
        self.density_contrast
    }

    pub fn volume(&self) -> f64 {
        (self.xmax - self.xmin) * (self.ymax - self.ymin) * (self.zmax - self.zmin)
    }

    pub fn centroid(&self) -> [f64; 3] {
        [
            0.5 * (self.xmin + self.xmax),
            0.5 * (self.ymin + self.ymax),
            0.5 * (self.zmin + self.zmax),
        ]
    }

    /// Closed-box containment (boundary counts as inside).
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        (self.xmin..=self.xmax).contains(&x)
            && (self.ymin..=self.ymax).contains(&y)
            && (self.zmin..=self.zmax).contains(&z)
    }
}

/// Cartesian grid of observation points at a common height.
///
/// Point `(ix, iy)` sits at `(x_coords[ix], y_coords[iy], height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationGrid {
    x_coords: Vec<f64>,
    y_coords: Vec<f64>,
    height: f64,
}

impl ObservationGrid {
    pub fn new(x_coords: Vec<f64>, y_coords: Vec<f64>, height: f64) -> GravGradResult<Self> {
        let grid = Self {
            x_coords,
            y_coords,
            height,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Single observation point.
    pub fn single(x: f64, y: f64, height: f64) -> GravGradResult<Self> {
        Self::new(vec![x], vec![y], height)
    }

    pub fn validate(&self) -> GravGradResult<()> {
        if self.x_coords.is_empty() || self.y_coords.is_empty() {
            return Err(GravGradError::Validation(format!(
                "observation grid must be non-empty, got {}x{}",
                self.x_coords.len(),
                self.y_coords.len()
            )));
        }
        for (i, &x) in self.x_coords.iter().enumerate() {
            check_finite(&format!("x_coords[{i}]"), x)?;
        }
        for (j, &y) in self.y_coords.iter().enumerate() {
            check_finite(&format!("y_coords[{j}]"), y)?;
        }
        check_finite("height", self.height)
    }

    #[inline]
    pub fn x_coords(&self) -> &[f64] {
        &self.x_coords
    }

    #[inline]
    pub fn y_coords(&self) -> &[f64] {
        &self.y_coords
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.x_coords.len()
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.y_coords.len()
    }

    /// Total number of observation points.
    #[inline]
    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of point `(ix, iy)`.
    #[inline]
    pub fn point(&self, ix: usize, iy: usize) -> [f64; 3] {
        [self.x_coords[ix], self.y_coords[iy], self.height]
    }
}

/// A complete, validated forward-model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub prisms: Vec<Prism>,
    pub grid: ObservationGrid,
    #[serde(default)]
    pub config: ForwardConfig,
}

impl Model {
    pub fn new(
        prisms: Vec<Prism>,
        grid: ObservationGrid,
        config: ForwardConfig,
    ) -> GravGradResult<Self> {
        let model = Self {
            prisms,
            grid,
            config,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> GravGradResult<()> {
        validate_prisms(&self.prisms)?;
        self.grid.validate()?;
        self.config.validate()
    }

    /// Parse and validate a JSON model description.
    pub fn from_json(json: &str) -> GravGradResult<Self> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| GravGradError::Config(format!("JSON parse error: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    pub fn to_json(&self) -> GravGradResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GravGradError::Config(format!("JSON encode error: {e}")))
    }
}

/// Non-empty prism list with every prism valid.
pub fn validate_prisms(prisms: &[Prism]) -> GravGradResult<()> {
    if prisms.is_empty() {
        return Err(GravGradError::Validation(
            "model must contain at least one prism".to_string(),
        ));
    }
    for (i, prism) in prisms.iter().enumerate() {
        prism
            .validate()
            .map_err(|e| GravGradError::Validation(format!("prism {i}: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Prism {
        Prism::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_prism_accessors() {
        let p = Prism::new(-1.0, 2.0, 0.5, 1.5, 3.0, 4.0, -0.25).unwrap();
        assert_eq!(p.x_bounds(), (-1.0, 2.0));
        assert_eq!(p.y_bounds(), (0.5, 1.5));
        assert_eq!(p.z_bounds(), (3.0, 4.0));
        assert_eq!(p.density_contrast(), -0.25);
        assert!((p.volume() - 3.0).abs() < 1e-12);
        assert_eq!(p.centroid(), [0.5, 1.0, 3.5]);
    }

    #[test]
    fn test_prism_rejects_unordered_bounds() {
        assert!(Prism::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0).is_err());
        assert!(Prism::new(0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0).is_err());
        assert!(Prism::new(0.0, 1.0, 0.0, 1.0, 2.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_prism_rejects_non_finite() {
        assert!(Prism::new(f64::NAN, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0).is_err());
        assert!(Prism::new(0.0, f64::INFINITY, 0.0, 1.0, 0.0, 1.0, 1.0).is_err());
        assert!(Prism::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_prism_error_message_names_axis() {
        let err = Prism::new(0.0, 1.0, 0.0, 1.0, 5.0, 1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("zmin must be < zmax"), "{err}");
    }

    #[test]
    fn test_prism_contains_closed() {
        let p = unit_cube();
        assert!(p.contains(0.5, 0.5, 0.5));
        assert!(p.contains(0.0, 1.0, 0.0));
        assert!(!p.contains(0.5, 0.5, -10.0));
    }

    #[test]
    fn test_with_density() {
        let p = unit_cube().with_density(-2.5).unwrap();
        assert_eq!(p.density_contrast(), -2.5);
        assert_eq!(p.x_bounds(), (0.0, 1.0));
        assert!(unit_cube().with_density(f64::INFINITY).is_err());
    }

    #[test]
    fn test_grid_shape() {
        let g = ObservationGrid::new(vec![0.0, 1.0, 2.0], vec![5.0, 6.0], -1.0).unwrap();
        assert_eq!(g.nx(), 3);
        assert_eq!(g.ny(), 2);
        assert_eq!(g.len(), 6);
        assert_eq!(g.point(2, 1), [2.0, 6.0, -1.0]);
    }

    #[test]
    fn test_grid_rejects_empty() {
        assert!(ObservationGrid::new(vec![], vec![1.0], 0.0).is_err());
        assert!(ObservationGrid::new(vec![1.0], vec![], 0.0).is_err());
    }

    #[test]
    fn test_grid_rejects_non_finite() {
        assert!(ObservationGrid::new(vec![0.0, f64::NAN], vec![1.0], 0.0).is_err());
        assert!(ObservationGrid::single(0.0, 0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_model_rejects_empty_prisms() {
        let grid = ObservationGrid::single(0.0, 0.0, -1.0).unwrap();
        let err = Model::new(vec![], grid, ForwardConfig::default()).unwrap_err();
        assert!(matches!(err, GravGradError::Validation(_)));
    }

    #[test]
    fn test_model_json_roundtrip() {
        let grid = ObservationGrid::new(vec![0.0, 0.5], vec![0.25], -10.0).unwrap();
        let model = Model::new(vec![unit_cube()], grid, ForwardConfig::with_gradient()).unwrap();
        let json = model.to_json().unwrap();
        assert_eq!(Model::from_json(&json).unwrap(), model);
    }

    #[test]
    fn test_model_from_json_validates() {
        let json = r#"{
            "prisms": [{"xmin": 1.0, "xmax": 0.0, "ymin": 0.0, "ymax": 1.0,
                        "zmin": 0.0, "zmax": 1.0, "density_contrast": 1.0}],
            "grid": {"x_coords": [0.0], "y_coords": [0.0], "height": -1.0}
        }"#;
        let err = Model::from_json(json).unwrap_err();
        assert!(err.to_string().contains("prism 0"), "{err}");
    }

    #[test]
    fn test_model_from_json_defaults_config() {
        let json = r#"{
            "prisms": [{"xmin": 0.0, "xmax": 1.0, "ymin": 0.0, "ymax": 1.0,
                        "zmin": 0.0, "zmax": 1.0, "density_contrast": 1.0}],
            "grid": {"x_coords": [0.0], "y_coords": [0.0], "height": -1.0}
        }"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.config, ForwardConfig::default());
    }
}
