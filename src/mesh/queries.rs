use super::{TriMesh, Triangulation};
use crate::error::Result;
use crate::math::{triangle_2d, Point2};

impl Triangulation {
    /// Returns the number of triangles incident to each vertex.
    #[must_use]
    pub fn valences(&self) -> Vec<u32> {
        let mut valence = vec![0u32; self.vertex_count];
        for tri in &self.triangles {
            for &v in tri {
                valence[v as usize] += 1;
            }
        }
        valence
    }

    /// Returns the sorted vertices sharing a triangle with `vertex`.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` is not a vertex of the triangulation.
    pub fn vertex_neighbours(&self, vertex: u32) -> Result<Vec<u32>> {
        self.check_vertex(vertex)?;
        let mut neighbours: Vec<u32> = self
            .triangles
            .iter()
            .filter(|tri| tri.contains(&vertex))
            .flat_map(|tri| tri.iter().copied())
            .filter(|&v| v != vertex)
            .collect();
        neighbours.sort_unstable();
        neighbours.dedup();
        Ok(neighbours)
    }

    /// Returns the sorted indices of every triangle owning any of `vertices`.
    ///
    /// # Errors
    ///
    /// Returns an error if any listed vertex is out of range.
    pub fn vertex_triangles(&self, vertices: &[u32]) -> Result<Vec<usize>> {
        let mut wanted = vec![false; self.vertex_count];
        for &v in vertices {
            self.check_vertex(v)?;
            wanted[v as usize] = true;
        }
        Ok(self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| tri.iter().any(|&v| wanted[v as usize]))
            .map(|(t, _)| t)
            .collect())
    }

    /// Returns every undirected edge once as `[a, b]` with `a < b`, sorted.
    #[must_use]
    pub fn segments(&self) -> Vec<[u32; 2]> {
        let mut segments: Vec<[u32; 2]> = self
            .triangles
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .map(|[a, b]| if a < b { [a, b] } else { [b, a] })
            .collect();
        segments.sort_unstable();
        segments.dedup();
        segments
    }

    /// Returns, for each triangle, the triangles across its three edges.
    ///
    /// Entry `k` is the neighbour opposite the triangle's `k`th vertex, or
    /// `None` when that edge lies on the boundary. An edge shared by more
    /// than two triangles has no well-defined neighbour and is reported as
    /// `None` for all of them.
    #[must_use]
    pub fn triangle_neighbours(&self) -> Vec<[Option<usize>; 3]> {
        let mut neighbours = vec![[None; 3]; self.triangles.len()];
        for run in self.edge_owners().chunk_by(|a, b| a.0 == b.0) {
            if let [(_, t0, k0), (_, t1, k1)] = *run {
                neighbours[t0][k0] = Some(t1);
                neighbours[t1][k1] = Some(t0);
            }
        }
        neighbours
    }

    /// Returns the sorted vertices lying on an edge owned by exactly one
    /// triangle.
    ///
    /// For a triangulation of a planar point set these are the convex hull
    /// vertices.
    #[must_use]
    pub fn boundary_vertices(&self) -> Vec<u32> {
        let mut boundary: Vec<u32> = self
            .edge_owners()
            .chunk_by(|a, b| a.0 == b.0)
            .filter(|run| run.len() == 1)
            .flat_map(|run| run[0].0)
            .collect();
        boundary.sort_unstable();
        boundary.dedup();
        boundary
    }

    /// Every edge as `(sorted endpoints, triangle, opposite corner)`, grouped
    /// by edge.
    fn edge_owners(&self) -> Vec<([u32; 2], usize, usize)> {
        let mut owners: Vec<([u32; 2], usize, usize)> = self
            .triangles
            .iter()
            .enumerate()
            .flat_map(|(t, &[a, b, c])| {
                [([b, c], t, 0), ([c, a], t, 1), ([a, b], t, 2)]
            })
            .map(|([a, b], t, k)| (if a < b { [a, b] } else { [b, a] }, t, k))
            .collect();
        owners.sort_unstable();
        owners
    }
}

impl TriMesh {
    /// Returns the unsigned planar area of each triangle.
    #[must_use]
    pub fn triangle_areas(&self) -> Vec<f64> {
        self.corners()
            .map(|[a, b, c]| triangle_2d::area(a, b, c))
            .collect()
    }

    /// Returns the edge lengths `[|v1 - v0|, |v2 - v1|, |v0 - v2|]` of each triangle.
    #[must_use]
    pub fn edge_lengths(&self) -> Vec<[f64; 3]> {
        self.corners()
            .map(|[a, b, c]| [(b - a).norm(), (c - b).norm(), (a - c).norm()])
            .collect()
    }

    /// Returns the centroid of each triangle.
    #[must_use]
    pub fn face_midpoints(&self) -> Vec<Point2> {
        self.corners()
            .map(|[a, b, c]| triangle_2d::centroid(a, b, c))
            .collect()
    }

    /// Returns the midpoint of each segment, in [`Triangulation::segments`] order.
    #[must_use]
    pub fn segment_midpoints(&self) -> Vec<Point2> {
        self.topology
            .segments()
            .iter()
            .map(|&[a, b]| {
                triangle_2d::midpoint(&self.vertices[a as usize], &self.vertices[b as usize])
            })
            .collect()
    }
}
