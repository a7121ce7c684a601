use std::ops::Deref;

use super::{Edge2Id, Grid2D};
use crate::error::TopologyError;

/// Scoped canonical edge orientation of a [`Grid2D`].
///
/// While the guard lives, every edge runs from the lower to the higher
/// dense vertex index. Reversed edges are flipped back when the guard is
/// dropped, whichever way the enclosing scope is left.
#[derive(Debug)]
pub struct CanonicalEdges<'a> {
    grid: &'a mut Grid2D,
    reverted: Vec<Edge2Id>,
}

impl<'a> CanonicalEdges<'a> {
    /// Reverses every edge whose first vertex index exceeds its last.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be enumerated. The grid is left
    /// untouched in that case.
    pub fn new(grid: &'a mut Grid2D) -> Result<Self, TopologyError> {
        let indexed = grid.enumerate_all()?;
        let reverted = indexed
            .edges
            .iter()
            .zip(&indexed.edge_ids)
            .filter(|(e, _)| e.first > e.last)
            .map(|(_, &id)| id)
            .collect();
        let mut guard = Self { grid, reverted };
        guard.flip();
        Ok(guard)
    }

    /// Number of edges reversed by this guard.
    #[must_use]
    pub fn n_reverted(&self) -> usize {
        self.reverted.len()
    }

    fn flip(&mut self) {
        for &id in &self.reverted {
            if let Some(edge) = self.grid.edges.get_mut(id) {
                edge.reverse();
            }
        }
    }
}

impl Deref for CanonicalEdges<'_> {
    type Target = Grid2D;

    fn deref(&self) -> &Grid2D {
        &*self.grid
    }
}

impl Drop for CanonicalEdges<'_> {
    fn drop(&mut self) {
        self.flip();
    }
}
