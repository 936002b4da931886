/// Per-vertex area and valence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexWeights {
    /// One third of the area of every incident triangle, summed per vertex.
    pub area: Vec<f64>,
    /// Number of triangles incident to each vertex.
    pub weight: Vec<u32>,
}

impl VertexWeights {
    fn zeros(vertex_count: usize) -> Self {
        Self {
            area: vec![0.0; vertex_count],
            weight: vec![0; vertex_count],
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weight.len()
    }

    /// Returns whether there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }

    /// Returns the sum of all vertex areas, i.e. the total triangle area.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.area.iter().sum()
    }

    fn add_triangle(&mut self, tri: &[u32; 3], area: f64) {
        let third = area / 3.0;
        for &v in tri {
            self.area[v as usize] += third;
            self.weight[v as usize] += 1;
        }
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: &Self) -> Self {
        for (a, b) in self.area.iter_mut().zip(&other.area) {
            *a += b;
        }
        for (a, b) in self.weight.iter_mut().zip(&other.weight) {
            *a += b;
        }
        self
    }
}

/// Parameters controlling how triangle contributions are accumulated.
#[derive(Debug, Clone, Copy)]
pub struct AccumulationParams {
    /// Triangle count from which accumulation is split across worker
    /// threads. Only used with the `parallel` feature.
    pub parallel_threshold: usize,
}

impl Default for AccumulationParams {
    fn default() -> Self {
        Self {
            parallel_threshold: 16_384,
        }
    }
}

/// Scatters one third of each triangle area onto its corners.
///
/// `areas` must hold one entry per triangle; callers validate this.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub(super) fn accumulate(
    vertex_count: usize,
    triangles: &[[u32; 3]],
    areas: &[f64],
    params: AccumulationParams,
) -> VertexWeights {
    debug_assert_eq!(triangles.len(), areas.len());

    #[cfg(feature = "parallel")]
    if triangles.len() >= params.parallel_threshold {
        return accumulate_parallel(vertex_count, triangles, areas);
    }

    let mut out = VertexWeights::zeros(vertex_count);
    for (tri, &area) in triangles.iter().zip(areas) {
        out.add_triangle(tri, area.abs());
    }
    out
}

/// Per-worker partial accumulators merged in a final reduction pass.
#[cfg(feature = "parallel")]
fn accumulate_parallel(
    vertex_count: usize,
    triangles: &[[u32; 3]],
    areas: &[f64],
) -> VertexWeights {
    use rayon::prelude::*;

    const MIN_CHUNK: usize = 4_096;

    log::debug!(
        "accumulating {} triangles onto {vertex_count} vertices in parallel",
        triangles.len()
    );

    triangles
        .par_iter()
        .zip(areas.par_iter())
        .with_min_len(MIN_CHUNK)
        .fold(
            || VertexWeights::zeros(vertex_count),
            |mut local, (tri, &area)| {
                local.add_triangle(tri, area.abs());
                local
            },
        )
        .reduce(|| VertexWeights::zeros(vertex_count), |a, b| a.merge(&b))
}
