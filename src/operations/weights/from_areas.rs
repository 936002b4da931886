use super::accumulate::{accumulate, AccumulationParams, VertexWeights};
use crate::error::{DomainError, Result, ShapeError};
use crate::mesh::Triangulation;

/// Computes per-vertex area weights from pre-computed triangle areas.
///
/// Skips the geometry entirely, for repeated calls against an unchanged
/// mesh whose triangle areas are cached by the caller. The magnitude of each
/// area is used, so signed areas are accepted.
pub struct AreaWeightsFromAreas<'a> {
    topology: &'a Triangulation,
    areas: &'a [f64],
    params: AccumulationParams,
}

impl<'a> AreaWeightsFromAreas<'a> {
    /// Creates a new `AreaWeightsFromAreas` operation.
    #[must_use]
    pub fn new(topology: &'a Triangulation, areas: &'a [f64]) -> Self {
        Self {
            topology,
            areas,
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
    /// Returns [`ShapeError::LengthMismatch`] if there is not exactly one
    /// area per triangle, or [`DomainError::NonFiniteArea`] for a NaN or
    /// infinite area. Nothing is accumulated on error.
    pub fn execute(&self) -> Result<VertexWeights> {
        if self.areas.len() != self.topology.len() {
            return Err(ShapeError::LengthMismatch {
                what: "triangle areas",
                expected: self.topology.len(),
                actual: self.areas.len(),
            }
            .into());
        }
        if let Some((triangle, &value)) = self
            .areas
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(DomainError::NonFiniteArea { triangle, value }.into());
        }

        log::debug!(
            "area weights from cached areas: {} vertices, {} triangles",
            self.topology.vertex_count(),
            self.topology.len()
        );

        Ok(accumulate(
            self.topology.vertex_count(),
            self.topology.triangles(),
            self.areas,
            self.params,
        ))
    }
}
