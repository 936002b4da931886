use super::Triangulation;

/// Compressed 1-hop vertex adjacency of a triangulation.
///
/// Neighbour lists are sorted ascending and never contain the vertex itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    neighbours: Vec<u32>,
}

impl Adjacency {
    pub(super) fn build(topology: &Triangulation) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![Vec::new(); topology.vertex_count()];
        for tri in topology.triangles() {
            for (i, &a) in tri.iter().enumerate() {
                for (j, &b) in tri.iter().enumerate() {
                    if i != j {
                        lists[a as usize].push(b);
                    }
                }
            }
        }

        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut neighbours = Vec::new();
        offsets.push(0);
        for mut list in lists {
            list.sort_unstable();
            list.dedup();
            neighbours.extend_from_slice(&list);
            offsets.push(neighbours.len());
        }

        Self {
            offsets,
            neighbours,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns whether the adjacency covers no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sorted neighbours of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= self.len()`.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> &[u32] {
        &self.neighbours[self.offsets[vertex]..self.offsets[vertex + 1]]
    }
}
