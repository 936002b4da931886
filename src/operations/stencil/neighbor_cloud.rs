use crate::error::{CapacityError, Result};
use crate::mesh::{Adjacency, Triangulation};

/// Value filling the unused trailing slots of a neighbor-cloud row.
///
/// Never a valid vertex index: triangulations are limited to `u32::MAX`
/// vertices.
pub const CLOUD_PADDING: u32 = u32::MAX;

/// Largest number of `u32` slots a single allocation can hold.
const MAX_ARENA_CELLS: usize = (usize::MAX >> 1) / std::mem::size_of::<u32>();

/// What to do when a vertex has more 2-hop neighbours than the row capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloudOverflow {
    /// Fail with [`CapacityError::Exceeded`].
    #[default]
    Error,
    /// Keep every 1-hop neighbour, then the lowest-index 2-hop neighbours
    /// that still fit. A 1-hop set larger than the capacity still fails.
    Truncate,
}

/// Fixed-width 2-hop neighbor stencils, one row per vertex.
///
/// Rows are stored row-major in a single buffer of `len() * capacity()`
/// entries. The first `count(v)` entries of row `v` are ascending, distinct
/// and never `v` itself; the rest hold [`CLOUD_PADDING`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborClouds {
    capacity: usize,
    cells: Vec<u32>,
    counts: Vec<u32>,
}

impl NeighborClouds {
    /// Returns the number of rows (vertices).
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the row width.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of real neighbours of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= self.len()`.
    #[must_use]
    pub fn count(&self, vertex: usize) -> usize {
        self.counts[vertex] as usize
    }

    /// Returns the per-row neighbour counts.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Returns the neighbours of `vertex` without padding.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= self.len()`.
    #[must_use]
    pub fn row(&self, vertex: usize) -> &[u32] {
        &self.padded_row(vertex)[..self.count(vertex)]
    }

    /// Returns the full fixed-width row of `vertex`, padding included.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= self.len()`.
    #[must_use]
    pub fn padded_row(&self, vertex: usize) -> &[u32] {
        let start = vertex * self.capacity;
        &self.cells[start..start + self.capacity]
    }

    /// Returns the row-major `len() x capacity()` buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[u32] {
        &self.cells
    }
}

/// Builds bounded 2-hop neighbor stencils for sparse-operator assembly.
///
/// The 1-hop set of a vertex is every vertex sharing a triangle with it; the
/// cloud adds the 1-hop sets of those neighbours. Rows are computed
/// independently and depend only on the mesh and the capacity, so the output
/// is identical whether or not the `parallel` feature is enabled.
pub struct BuildNeighborClouds<'a> {
    topology: &'a Triangulation,
    capacity: std::result::Result<usize, CapacityError>,
    overflow: CloudOverflow,
}

impl<'a> BuildNeighborClouds<'a> {
    /// Creates a builder writing rows of `capacity` entries.
    #[must_use]
    pub fn new(topology: &'a Triangulation, capacity: usize) -> Self {
        Self {
            topology,
            capacity: Ok(capacity),
            overflow: CloudOverflow::default(),
        }
    }

    /// Creates a builder for a stencil width `nnz`, i.e. rows of `nnz * nnz`
    /// entries.
    ///
    /// A width whose square overflows `usize` is reported by
    /// [`execute`](Self::execute) as [`CapacityError::WidthOverflow`].
    #[must_use]
    pub fn with_stencil_width(topology: &'a Triangulation, nnz: usize) -> Self {
        Self {
            topology,
            capacity: nnz
                .checked_mul(nnz)
                .ok_or(CapacityError::WidthOverflow { nnz }),
            overflow: CloudOverflow::default(),
        }
    }

    /// Sets the overflow policy.
    #[must_use]
    pub fn with_overflow(mut self, overflow: CloudOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Builds the clouds.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Zero`] for a zero capacity,
    /// [`CapacityError::WidthOverflow`] or [`CapacityError::ArenaTooLarge`]
    /// when the row buffer cannot be addressed, and
    /// [`CapacityError::Exceeded`] for the lowest-index vertex whose cloud
    /// does not fit under the configured policy. No rows are returned on
    /// error.
    pub fn execute(&self) -> Result<NeighborClouds> {
        let capacity = self.capacity.clone()?;
        if capacity == 0 {
            return Err(CapacityError::Zero.into());
        }

        let n = self.topology.vertex_count();
        let total = n
            .checked_mul(capacity)
            .filter(|&total| total <= MAX_ARENA_CELLS)
            .ok_or(CapacityError::ArenaTooLarge { rows: n, capacity })?;

        log::debug!(
            "neighbor clouds: {n} vertices, {} triangles, capacity {capacity}",
            self.topology.len()
        );

        let adjacency = self.topology.adjacency();
        let rows = self.expand_all(&adjacency, capacity);

        let mut cells = Vec::with_capacity(total);
        let mut counts = Vec::with_capacity(n);
        let mut truncated = 0usize;
        for row in rows {
            let row = row?;
            truncated += usize::from(row.truncated);
            // A row never holds more than n - 1 < u32::MAX entries.
            #[allow(clippy::cast_possible_truncation)]
            let count = row.neighbours.len() as u32;
            counts.push(count);
            cells.extend_from_slice(&row.neighbours);
            cells.resize(cells.len() + capacity - row.neighbours.len(), CLOUD_PADDING);
        }

        if truncated > 0 {
            log::warn!("truncated {truncated} of {n} neighbor clouds to capacity {capacity}");
        }

        Ok(NeighborClouds {
            capacity,
            cells,
            counts,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn expand_all(
        &self,
        adjacency: &Adjacency,
        capacity: usize,
    ) -> Vec<std::result::Result<Row, CapacityError>> {
        (0..adjacency.len())
            .map(|v| expand(adjacency, v, capacity, self.overflow))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn expand_all(
        &self,
        adjacency: &Adjacency,
        capacity: usize,
    ) -> Vec<std::result::Result<Row, CapacityError>> {
        use rayon::prelude::*;

        (0..adjacency.len())
            .into_par_iter()
            .map(|v| expand(adjacency, v, capacity, self.overflow))
            .collect()
    }
}

/// Builds the neighbor clouds of `topology` with rows of `capacity` entries
/// and the default overflow policy.
///
/// # Errors
///
/// See [`BuildNeighborClouds::execute`].
pub fn build_neighbor_clouds(topology: &Triangulation, capacity: usize) -> Result<NeighborClouds> {
    BuildNeighborClouds::new(topology, capacity).execute()
}

struct Row {
    neighbours: Vec<u32>,
    truncated: bool,
}

// vertex < vertex_count <= u32::MAX
#[allow(clippy::cast_possible_truncation)]
fn expand(
    adjacency: &Adjacency,
    vertex: usize,
    capacity: usize,
    overflow: CloudOverflow,
) -> std::result::Result<Row, CapacityError> {
    let one_hop = adjacency.neighbours(vertex);

    let mut two_hop: Vec<u32> = one_hop
        .iter()
        .flat_map(|&u| adjacency.neighbours(u as usize))
        .copied()
        .filter(|&w| w as usize != vertex && one_hop.binary_search(&w).is_err())
        .collect();
    two_hop.sort_unstable();
    two_hop.dedup();

    let required = one_hop.len() + two_hop.len();
    let mut truncated = false;
    if required > capacity {
        if overflow == CloudOverflow::Error || one_hop.len() > capacity {
            return Err(CapacityError::Exceeded {
                vertex: vertex as u32,
                required,
                capacity,
            });
        }
        two_hop.truncate(capacity - one_hop.len());
        truncated = true;
    }

    let mut neighbours = Vec::with_capacity(one_hop.len() + two_hop.len());
    neighbours.extend_from_slice(one_hop);
    neighbours.extend_from_slice(&two_hop);
    neighbours.sort_unstable();

    Ok(Row {
        neighbours,
        truncated,
    })
}
