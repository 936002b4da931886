use std::f64::consts::{PI, TAU};

use super::accumulate::{accumulate, AccumulationParams, VertexWeights};
use crate::error::Result;
use crate::math::{triangle_2d, Point2};
use crate::mesh::TriMesh;
use crate::operations::projection::Ellipsoid;

/// Computes per-vertex area weights of a geographic mesh.
///
/// Vertices are `(lon, lat)` in radians. Each triangle is flattened onto a
/// local plane scaled by the ellipsoid radius `R` at its mean latitude
/// `lat_m`: a corner maps to `(R cos(lat_m) dlon, R lat)`, with `dlon` taken
/// relative to the first corner in `(-pi, pi]` so triangles straddling the
/// antimeridian stay compact. The planar area is then split as in
/// [`AreaWeights`](super::AreaWeights).
pub struct ProjectedAreaWeights<'a> {
    mesh: &'a TriMesh,
    ellipsoid: Ellipsoid,
    params: AccumulationParams,
}

impl<'a> ProjectedAreaWeights<'a> {
    /// Creates a new `ProjectedAreaWeights` operation.
    #[must_use]
    pub fn new(mesh: &'a TriMesh, ellipsoid: Ellipsoid) -> Self {
        Self {
            mesh,
            ellipsoid,
            params: AccumulationParams::default(),
        }
    }

    /// Sets custom accumulation parameters.
    #[must_use]
    pub fn with_params(mut self, params: AccumulationParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the local area of every triangle.
    #[must_use]
    pub fn triangle_areas(&self) -> Vec<f64> {
        self.mesh
            .corners()
            .map(|corners| self.local_area(corners))
            .collect()
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Infallible for a constructed [`TriMesh`] and [`Ellipsoid`]; the
    /// `Result` keeps the signature aligned with the other weighting
    /// operations.
    pub fn execute(&self) -> Result<VertexWeights> {
        let topology = self.mesh.topology();
        log::debug!(
            "projected area weights: {} vertices, {} triangles, radii ({}, {})",
            topology.vertex_count(),
            topology.len(),
            self.ellipsoid.equatorial(),
            self.ellipsoid.polar()
        );

        let areas = self.triangle_areas();
        Ok(accumulate(
            topology.vertex_count(),
            topology.triangles(),
            &areas,
            self.params,
        ))
    }

    fn local_area(&self, [a, b, c]: [&Point2; 3]) -> f64 {
        let lat_m = (a.y + b.y + c.y) / 3.0;
        let radius = self.ellipsoid.radius_at(lat_m);
        let x_scale = radius * lat_m.cos();

        let flatten = |p: &Point2| Point2::new(x_scale * wrap_pi(p.x - a.x), radius * p.y);
        triangle_2d::area(&flatten(a), &flatten(b), &flatten(c))
    }
}

/// Wraps an angle into `(-pi, pi]`.
fn wrap_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}
