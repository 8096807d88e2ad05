// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Prism Edge Loop and Local Edge Frame
// ─────────────────────────────────────────────────────────────────────
//! The prism's y–z cross-section is traversed as a closed loop of four
//! edges; the x extent is integrated analytically per edge.
//!
//! Loop vertices: `(ymin,zmin) → (ymin,zmax) → (ymax,zmax) → (ymax,zmin)`
//! and back, so consecutive edges share a vertex. The outward normal of
//! each edge is `(ndoty, ndotz) = (−sine, cose)`.

use gravgrad_types::Prism;

use crate::params::EDGES_PER_PRISM;
use crate::primitives::{q_term, radius};

/// One directed side of the y–z cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub y_start: f64,
    pub z_start: f64,
    pub y_end: f64,
    pub z_end: f64,
    /// Direction cosine along z.
    pub sine: f64,
    /// Direction cosine along y.
    pub cose: f64,
}

impl Edge {
    pub fn new(y_start: f64, z_start: f64, y_end: f64, z_end: f64) -> Self {
        let delta_y = y_end - y_start;
        let delta_z = z_end - z_start;
        let length = (delta_y * delta_y + delta_z * delta_z).sqrt();
        Self {
            y_start,
            z_start,
            y_end,
            z_end,
            sine: delta_z / length,
            cose: delta_y / length,
        }
    }

    #[inline]
    pub fn ndoty(&self) -> f64 {
        -self.sine
    }

    #[inline]
    pub fn ndotz(&self) -> f64 {
        self.cose
    }

    /// Rotate the edge into the `(v, w)` frame centred on an observer at
    /// `(y_obs, z_obs)`.
    pub fn localise(&self, y_obs: f64, z_obs: f64) -> LocalEdge {
        let (cose, sine) = (self.cose, self.sine);
        let v_obs = cose * y_obs + sine * z_obs;
        let w_obs = -sine * y_obs + cose * z_obs;
        LocalEdge {
            y_start: self.y_start - y_obs,
            y_end: self.y_end - y_obs,
            z_start: self.z_start - z_obs,
            z_end: self.z_end - z_obs,
            v_start: cose * self.y_start + sine * self.z_start - v_obs,
            v_end: cose * self.y_end + sine * self.z_end - v_obs,
            w: -sine * self.y_start + cose * self.z_start - w_obs,
        }
    }
}

/// Closed edge loop of a prism's y–z cross-section.
pub fn edge_loop(prism: &Prism) -> [Edge; EDGES_PER_PRISM] {
    let (ymin, ymax) = prism.y_bounds();
    let (zmin, zmax) = prism.z_bounds();
    [
        Edge::new(ymin, zmin, ymin, zmax),
        Edge::new(ymin, zmax, ymax, zmax),
        Edge::new(ymax, zmax, ymax, zmin),
        Edge::new(ymax, zmin, ymin, zmin),
    ]
}

/// Edge expressed relative to one observer.
///
/// `w` is shared by both endpoints: the edge is a line of constant `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalEdge {
    pub y_start: f64,
    pub y_end: f64,
    pub z_start: f64,
    pub z_end: f64,
    pub v_start: f64,
    pub v_end: f64,
    pub w: f64,
}

/// Everything the primitives need at one (x-bound, endpoint) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub v: f64,
    pub w: f64,
    pub r: f64,
    pub q: f64,
}

impl Corner {
    #[inline]
    fn new(x: f64, y: f64, z: f64, v: f64, w: f64) -> Self {
        let r = radius(x, v, w);
        Self {
            x,
            y,
            z,
            v,
            w,
            r,
            q: q_term(x, r, w),
        }
    }
}

/// The four corners of one edge: `[lower/upper x-bound][start/end vertex]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners([[Corner; 2]; 2]);

impl Corners {
    /// `x_lo`, `x_hi` are the prism's x-bounds relative to the observer.
    pub fn new(local: &LocalEdge, x_lo: f64, x_hi: f64) -> Self {
        let at = |x: f64| {
            [
                Corner::new(x, local.y_start, local.z_start, local.v_start, local.w),
                Corner::new(x, local.y_end, local.z_end, local.v_end, local.w),
            ]
        };
        Self([at(x_lo), at(x_hi)])
    }

    #[inline]
    pub fn get(&self, upper_x: bool, end_vertex: bool) -> &Corner {
        &self.0[upper_x as usize][end_vertex as usize]
    }

    /// `[f(x₂,end) − f(x₂,start)] − [f(x₁,end) − f(x₁,start)]`
    #[inline]
    pub fn across_endpoints<F: Fn(&Corner) -> f64>(&self, f: F) -> f64 {
        let [lo, hi] = &self.0;
        (f(&hi[1]) - f(&hi[0])) - (f(&lo[1]) - f(&lo[0]))
    }

    /// `[f(x₂,end) − f(x₁,end)] − [f(x₂,start) − f(x₁,start)]`
    ///
    /// Same value as [`Corners::across_endpoints`] in exact arithmetic; the
    /// grouping differs and is kept per term for reproducible rounding.
    #[inline]
    pub fn across_bounds<F: Fn(&Corner) -> f64>(&self, f: F) -> f64 {
        let [lo, hi] = &self.0;
        (f(&hi[1]) - f(&lo[1])) - (f(&hi[0]) - f(&lo[0]))
    }
}
