use slotmap::{Key, SecondaryMap};

use super::{Edge2Id, Grid2D};
use crate::error::TopologyError;
use crate::math::Point2;

/// An edge expressed through dense vertex and cell indices.
#[derive(Debug, Clone, Copy)]
pub struct IndexedEdge {
    pub first: usize,
    pub last: usize,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub boundary_type: i32,
}

impl IndexedEdge {
    /// Returns `true` if at least one side of the edge has no cell.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }
}

/// A cell expressed through dense edge indices.
#[derive(Debug, Clone, Default)]
pub struct IndexedCell {
    /// Bounding edges in loop order.
    pub edges: Vec<usize>,
    /// `is_left[k]` tells whether this cell is the left cell of `edges[k]`.
    pub is_left: Vec<bool>,
}

/// Dense, index-based snapshot of a [`Grid2D`].
///
/// Index `i` of every container corresponds to the `i`-th primitive in arena
/// iteration order. `edge_ids` maps edge indices back to arena keys.
#[derive(Debug, Clone, Default)]
pub struct IndexedGrid2D {
    pub points: Vec<Point2>,
    pub edges: Vec<IndexedEdge>,
    pub cells: Vec<IndexedCell>,
    pub edge_ids: Vec<Edge2Id>,
}

impl Grid2D {
    /// Assigns stable dense indices to every vertex, edge and cell.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge or cell refers to a primitive that is not
    /// stored in this grid.
    pub fn enumerate_all(&self) -> Result<IndexedGrid2D, TopologyError> {
        let vertex_index = dense_index(self.vertices.keys());
        let edge_index = dense_index(self.edges.keys());
        let cell_index = dense_index(self.cells.keys());

        let points = self.vertices.values().map(|v| v.point).collect();

        let edges = self
            .edges
            .values()
            .map(|e| {
                Ok(IndexedEdge {
                    first: lookup(&vertex_index, e.first, "2d vertex")?,
                    last: lookup(&vertex_index, e.last, "2d vertex")?,
                    left: e.left.map(|c| lookup(&cell_index, c, "2d cell")).transpose()?,
                    right: e.right.map(|c| lookup(&cell_index, c, "2d cell")).transpose()?,
                    boundary_type: e.boundary_type,
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;

        let mut cells = Vec::with_capacity(self.cells.len());
        for (ci, cell) in self.cells.values().enumerate() {
            let mut indexed = IndexedCell::default();
            for &eid in &cell.edges {
                let ei = lookup(&edge_index, eid, "2d edge")?;
                indexed.edges.push(ei);
                indexed.is_left.push(edges[ei].left == Some(ci));
            }
            cells.push(indexed);
        }

        Ok(IndexedGrid2D {
            points,
            edges,
            cells,
            edge_ids: self.edges.keys().collect(),
        })
    }
}

fn dense_index<K: Key>(keys: impl Iterator<Item = K>) -> SecondaryMap<K, usize> {
    keys.enumerate().map(|(i, k)| (k, i)).collect()
}

fn lookup<K: Key>(
    index: &SecondaryMap<K, usize>,
    key: K,
    what: &str,
) -> Result<usize, TopologyError> {
    index
        .get(key)
        .copied()
        .ok_or_else(|| TopologyError::EntityNotFound(what.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_insertion_order() {
        let grid = Grid2D::rectangular(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        let indexed = grid.enumerate_all().unwrap();
        assert_eq!(indexed.points.len(), 6);
        assert_eq!(indexed.cells.len(), 2);
        assert_eq!(indexed.points[4], Point2::new(1.0, 1.0));
        for (i, (id, edge)) in grid.edges().enumerate() {
            assert_eq!(indexed.edge_ids[i], id);
            let first = indexed.edges[i].first;
            assert_eq!(indexed.points[first], grid.vertex(edge.first).unwrap().point);
        }
    }

    #[test]
    fn left_flags_match_edge_sides() {
        let grid = Grid2D::rectangular(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        let indexed = grid.enumerate_all().unwrap();
        for (ci, cell) in indexed.cells.iter().enumerate() {
            for (k, &e) in cell.edges.iter().enumerate() {
                let edge = &indexed.edges[e];
                if cell.is_left[k] {
                    assert_eq!(edge.left, Some(ci));
                } else {
                    assert_eq!(edge.right, Some(ci));
                }
            }
        }
        let shared = indexed.edges.iter().filter(|e| !e.is_boundary()).count();
        assert_eq!(shared, 1);
    }
}
