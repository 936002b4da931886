mod adjacency;
mod queries;

pub use adjacency::Adjacency;

use crate::error::{IndexError, Result, ShapeError};
use crate::math::Point2;

/// Triangle connectivity over an explicit number of vertices.
///
/// Every triangle index lies in `[0, vertex_count)` and the three indices of a
/// triangle are pairwise distinct. Both are checked on construction, so the
/// kernels never read past a vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangulation {
    vertex_count: usize,
    triangles: Vec<[u32; 3]>,
}

impl Triangulation {
    /// Creates a triangulation from index triples.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if a triangle references a vertex outside
    /// `[0, vertex_count)`, or a [`ShapeError`] if a triangle repeats a vertex
    /// or `vertex_count` does not fit 32-bit indices.
    pub fn new(vertex_count: usize, triangles: Vec<[u32; 3]>) -> Result<Self> {
        // u32::MAX is reserved as the neighbor-cloud padding value.
        if vertex_count > u32::MAX as usize {
            return Err(ShapeError::TooManyVertices { vertex_count }.into());
        }

        for (t, tri) in triangles.iter().enumerate() {
            for (k, &index) in tri.iter().enumerate() {
                if index as usize >= vertex_count {
                    return Err(IndexError::VertexOutOfRange {
                        triangle: t,
                        index,
                        vertex_count,
                    }
                    .into());
                }
                if tri[..k].contains(&index) {
                    return Err(ShapeError::RepeatedVertex { triangle: t, index }.into());
                }
            }
        }

        Ok(Self {
            vertex_count,
            triangles,
        })
    }

    /// Creates a triangulation from a flat, row-major `nt x 3` index buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotTripleWide`] if the buffer length is not a
    /// multiple of three, plus every error of [`Triangulation::new`].
    pub fn from_flat(vertex_count: usize, flat: &[u32]) -> Result<Self> {
        if flat.len() % 3 != 0 {
            return Err(ShapeError::NotTripleWide { len: flat.len() }.into());
        }
        let triangles = flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(vertex_count, triangles)
    }

    /// Returns the number of vertices the connectivity refers to.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns whether the triangulation holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the triangle index triples.
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the 1-hop vertex adjacency.
    #[must_use]
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::build(self)
    }

    pub(crate) fn check_vertex(&self, index: u32) -> Result<()> {
        if index as usize >= self.vertex_count {
            return Err(IndexError::VertexQuery {
                index,
                vertex_count: self.vertex_count,
            }
            .into());
        }
        Ok(())
    }
}

/// A planar or geographic triangle mesh.
///
/// Vertices are either planar `(x, y)` or geographic `(lon, lat)` in radians;
/// the kernels that care say which one they expect.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    vertices: Vec<Point2>,
    topology: Triangulation,
}

impl TriMesh {
    /// Creates a mesh from vertex positions and triangle index triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the connectivity is invalid for
    /// `vertices.len()` vertices.
    pub fn new(vertices: Vec<Point2>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let topology = Triangulation::new(vertices.len(), triangles)?;
        Ok(Self { vertices, topology })
    }

    /// Creates a mesh from parallel coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if `x` and `y` differ in
    /// length, plus every error of [`TriMesh::new`].
    pub fn from_xy(x: &[f64], y: &[f64], triangles: Vec<[u32; 3]>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ShapeError::LengthMismatch {
                what: "y coordinates",
                expected: x.len(),
                actual: y.len(),
            }
            .into());
        }
        let vertices = x.iter().zip(y).map(|(&x, &y)| Point2::new(x, y)).collect();
        Self::new(vertices, triangles)
    }

    /// Pairs vertex positions with an already validated triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if the triangulation was built
    /// for a different number of vertices.
    pub fn from_parts(vertices: Vec<Point2>, topology: Triangulation) -> Result<Self> {
        if vertices.len() != topology.vertex_count() {
            return Err(ShapeError::LengthMismatch {
                what: "vertex positions",
                expected: topology.vertex_count(),
                actual: vertices.len(),
            }
            .into());
        }
        Ok(Self { vertices, topology })
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the connectivity.
    #[must_use]
    pub fn topology(&self) -> &Triangulation {
        &self.topology
    }

    /// Returns the triangle index triples.
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        self.topology.triangles()
    }

    /// Returns the three corner positions of every triangle.
    pub fn corners(&self) -> impl Iterator<Item = [&Point2; 3]> + '_ {
        self.topology.triangles().iter().map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MeshkernError;

    #[test]
    fn rejects_out_of_range_index() {
        let err = Triangulation::new(3, vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            MeshkernError::Index(IndexError::VertexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn rejects_repeated_vertex() {
        let err = Triangulation::new(3, vec![[0, 1, 2], [2, 1, 2]]).unwrap_err();
        assert!(matches!(
            err,
            MeshkernError::Shape(ShapeError::RepeatedVertex {
                triangle: 1,
                index: 2
            })
        ));
    }

    #[test]
    fn flat_buffer_must_be_triple_wide() {
        let err = Triangulation::from_flat(4, &[0, 1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            MeshkernError::Shape(ShapeError::NotTripleWide { len: 4 })
        ));

        let tri = Triangulation::from_flat(4, &[0, 1, 2, 1, 3, 2]).unwrap();
        assert_eq!(tri.triangles(), &[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(tri.len(), 2);
    }

    #[test]
    fn coordinate_lengths_must_match() {
        let err = TriMesh::from_xy(&[0.0, 1.0, 0.0], &[0.0, 0.0], vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(
            err,
            MeshkernError::Shape(ShapeError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn parts_must_agree_on_vertex_count() {
        let topology = Triangulation::new(4, vec![[0, 1, 2]]).unwrap();
        let vertices = vec![Point2::new(0.0, 0.0); 3];
        assert!(TriMesh::from_parts(vertices, topology).is_err());
    }

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = TriMesh::new(Vec::new(), Vec::new()).unwrap();
        assert!(mesh.topology().is_empty());
        assert_eq!(mesh.corners().count(), 0);
    }
}
