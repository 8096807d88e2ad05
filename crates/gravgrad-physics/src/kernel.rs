// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Edge-Integral Kernel
// ─────────────────────────────────────────────────────────────────────
//! Unit-density contribution of one prism at one observation point.
//!
//! Pure functions over stack values: no shared state, so any number of
//! observation points can be evaluated concurrently.

use std::ops::AddAssign;

use gravgrad_types::Prism;

use crate::edge::{edge_loop, Corners, Edge};
use crate::params::EDGES_PER_PRISM;
use crate::primitives::{t1, t1x, t1y, t1z, t2, t2x, t2y, t2z, t3, t3x, t3y, t3z};

/// Raw (unscaled) sums for the directly computed channels.
///
/// `gxx` is absent on purpose: it is derived from the trace identity
/// after scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contribution {
    pub gy: f64,
    pub gz: f64,
    pub gzx: f64,
    pub gzy: f64,
    pub gzz: f64,
    pub gyx: f64,
    pub gyy: f64,
}

impl Contribution {
    /// Multiply every channel by `factor` (the prism's density contrast).
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            gy: self.gy * factor,
            gz: self.gz * factor,
            gzx: self.gzx * factor,
            gzy: self.gzy * factor,
            gzz: self.gzz * factor,
            gyx: self.gyx * factor,
            gyy: self.gyy * factor,
        }
    }

    pub fn is_finite(&self) -> bool {
        [
            self.gy, self.gz, self.gzx, self.gzy, self.gzz, self.gyx, self.gyy,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl AddAssign for Contribution {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.gy += rhs.gy;
        self.gz += rhs.gz;
        self.gzx += rhs.gzx;
        self.gzy += rhs.gzy;
        self.gzz += rhs.gzz;
        self.gyx += rhs.gyx;
        self.gyy += rhs.gyy;
    }
}

/// A prism prepared for repeated evaluation: edge loop built once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrismSource {
    pub x_bounds: (f64, f64),
    pub edges: [Edge; EDGES_PER_PRISM],
    pub density: f64,
}

impl PrismSource {
    pub fn new(prism: &Prism) -> Self {
        Self {
            x_bounds: prism.x_bounds(),
            edges: edge_loop(prism),
            density: prism.density_contrast(),
        }
    }

    /// Density-weighted contribution at `point`.
    #[inline]
    pub fn evaluate(&self, point: [f64; 3], gradient: bool) -> Contribution {
        prism_contribution(&self.edges, self.x_bounds, point, gradient).scaled(self.density)
    }
}

/// Unit-density contribution of one edge.
pub fn edge_contribution(
    edge: &Edge,
    x_bounds: (f64, f64),
    point: [f64; 3],
    gradient: bool,
) -> Contribution {
    let [x_obs, y_obs, z_obs] = point;
    let local = edge.localise(y_obs, z_obs);
    let corners = Corners::new(&local, x_bounds.0 - x_obs, x_bounds.1 - x_obs);
    let (cose, sine) = (edge.cose, edge.sine);
    let (ndoty, ndotz) = (edge.ndoty(), edge.ndotz());

    let int1 = corners.across_endpoints(|c| t1(c.x, c.v, c.r));
    let int2 = corners.across_bounds(|c| t2(c.x, c.v, c.r));
    let int3 = corners.across_endpoints(|c| t3(c.x, c.v, c.w, c.r));
    let field = int1 + int2 + int3;

    let mut out = Contribution {
        gy: field * ndoty,
        gz: field * ndotz,
        ..Contribution::default()
    };
    if !gradient {
        return out;
    }

    let dx1 = corners.across_bounds(|c| t1x(c.v, c.r));
    let dx2 = corners.across_bounds(|c| t2x(c.x, c.v, c.r));
    let dx3 = corners.across_bounds(|c| t3x(c.q, c.x, c.r, c.v, c.w));

    let dy1 = corners.across_endpoints(|c| t1y(c.x, c.y, c.v, c.r, cose));
    let dy2 = corners.across_bounds(|c| t2y(c.x, c.y, c.v, c.r, cose));
    let dy3 = corners.across_bounds(|c| t3y(c.q, c.x, c.y, c.r, c.v, c.w, cose, sine));

    let dz1 = corners.across_endpoints(|c| t1z(c.x, c.v, c.z, c.r, sine));
    let dz2 = corners.across_bounds(|c| t2z(c.x, c.v, c.z, c.r, sine));
    let dz3 = corners.across_bounds(|c| t3z(c.q, c.x, c.z, c.r, c.v, c.w, cose, sine));

    let dx = dx1 + dx2 + dx3;
    let dy = dy1 + dy2 + dy3;
    let dz = dz1 + dz2 + dz3;

    out.gzx = dx * ndotz;
    out.gzy = dy * ndotz;
    out.gzz = dz * ndotz;
    out.gyx = dx * ndoty;
    out.gyy = dy * ndoty;
    out
}

/// Unit-density contribution of a whole prism, summed over its edge loop
/// in loop order.
pub fn prism_contribution(
    edges: &[Edge; EDGES_PER_PRISM],
    x_bounds: (f64, f64),
    point: [f64; 3],
    gradient: bool,
) -> Contribution {
    let mut total = Contribution::default();
    for edge in edges {
        total += edge_contribution(edge, x_bounds, point, gradient);
    }
    debug_assert!(
        total.is_finite(),
        "non-finite kernel output at {point:?}: {total:?}"
    );
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Prism {
        Prism::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_field_only_leaves_gradient_zero() {
        let src = PrismSource::new(&cube());
        let c = src.evaluate([0.3, 0.7, -2.0], false);
        assert!(c.gz != 0.0);
        assert_eq!(c.gzx, 0.0);
        assert_eq!(c.gzz, 0.0);
        assert_eq!(c.gyy, 0.0);
    }

    #[test]
    fn test_gradient_mode_does_not_change_field() {
        let src = PrismSource::new(&cube());
        let p = [1.7, -0.4, -0.5];
        let a = src.evaluate(p, false);
        let b = src.evaluate(p, true);
        assert_eq!(a.gz, b.gz);
        assert_eq!(a.gy, b.gy);
    }

    #[test]
    fn test_density_weighting() {
        let src = PrismSource::new(&cube().with_density(2.5).unwrap());
        let unit = prism_contribution(&src.edges, src.x_bounds, [0.2, 0.2, -1.0], true);
        let weighted = src.evaluate([0.2, 0.2, -1.0], true);
        assert_eq!(weighted, unit.scaled(2.5));
    }

    #[test]
    fn test_symmetric_point_has_no_horizontal_field() {
        let src = PrismSource::new(&cube());
        let c = src.evaluate([0.5, 0.5, -10.0], true);
        assert!(c.gy.abs() < 1e-12 * c.gz.abs().max(1.0), "gy = {}", c.gy);
        assert!(c.gzx.abs() < 1e-12, "gzx = {}", c.gzx);
        assert!(c.gyx.abs() < 1e-12, "gyx = {}", c.gyx);
    }

    #[test]
    fn test_edge_sum_matches_prism() {
        let src = PrismSource::new(&cube());
        let p = [0.9, 1.3, -0.2];
        let mut total = Contribution::default();
        for edge in &src.edges {
            total += edge_contribution(edge, src.x_bounds, p, true);
        }
        assert_eq!(total, prism_contribution(&src.edges, src.x_bounds, p, true));
    }

    #[test]
    fn test_vertex_and_edge_points_are_finite() {
        let src = PrismSource::new(&cube());
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.5, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.5, 0.5, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 1.0, -3.0],
            [0.5, 0.5, 0.5],
        ];
        for p in points {
            let c = src.evaluate(p, true);
            assert!(c.is_finite(), "non-finite at {p:?}: {c:?}");
        }
    }
}
