use super::accumulate::{accumulate, AccumulationParams, VertexWeights};
use crate::error::Result;
use crate::mesh::TriMesh;

/// Computes per-vertex area weights of a planar mesh.
///
/// Each triangle's unsigned area is split in three equal parts, one per
/// corner. `weight[i]` counts the triangles incident to vertex `i`; a
/// zero-area triangle adds nothing to `area` but still counts for `weight`.
pub struct AreaWeights<'a> {
    mesh: &'a TriMesh,
    params: AccumulationParams,
}

impl<'a> AreaWeights<'a> {
    /// Creates a new `AreaWeights` operation with default parameters.
    #[must_use]
    pub fn new(mesh: &'a TriMesh) -> Self {
        Self {
            mesh,
            params: AccumulationParams::default(),
        }
    }

    /// Sets custom accumulation parameters.
    #[must_use]
    pub fn with_params(mut self, params: AccumulationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Infallible for a constructed [`TriMesh`]; the `Result` keeps the
    /// signature aligned with the other weighting operations.
    pub fn execute(&self) -> Result<VertexWeights> {
        let topology = self.mesh.topology();
        log::debug!(
            "area weights: {} vertices, {} triangles",
            topology.vertex_count(),
            topology.len()
        );

        let areas = self.mesh.triangle_areas();
        Ok(accumulate(
            topology.vertex_count(),
            topology.triangles(),
            &areas,
            self.params,
        ))
    }
}
