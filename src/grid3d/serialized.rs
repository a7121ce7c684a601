//! Flat, index-based grid arrays.
//!
//! Construction algorithms emit primitives into a [`SerializedGrid`] where
//! every cross reference is a plain index into an earlier container. Face
//! adjacency slots are written back when cells are added. [`SerializedGrid::assemble`]
//! then materializes the arena-backed [`Grid3D`] in one pass per container.

use super::{CellData, CellId, EdgeData, EdgeId, FaceData, FaceId, Grid3D, VertexData, VertexId};
use crate::error::TopologyError;
use crate::math::Point3;

/// Adjacency slot of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// An edge as a pair of point indices.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRecord {
    pub ends: [usize; 2],
    pub curvature: f64,
}

/// A face as a loop of edge indices with two trailing cell slots.
#[derive(Debug, Clone, Default)]
pub struct FaceRecord {
    pub edges: Vec<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub boundary_type: Option<i32>,
}

impl FaceRecord {
    fn slot_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Index-based grid under construction.
#[derive(Debug, Clone, Default)]
pub struct SerializedGrid {
    pub points: Vec<Point3>,
    pub edges: Vec<EdgeRecord>,
    pub faces: Vec<FaceRecord>,
    /// Bounding face indices of every cell.
    pub cells: Vec<Vec<usize>>,
}

impl SerializedGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns its index.
    pub fn add_point(&mut self, point: Point3) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Appends a straight edge and returns its index.
    pub fn add_edge(&mut self, start: usize, end: usize) -> usize {
        self.add_curved_edge(start, end, 0.0)
    }

    /// Appends an edge with the given curvature and returns its index.
    pub fn add_curved_edge(&mut self, start: usize, end: usize, curvature: f64) -> usize {
        self.edges.push(EdgeRecord {
            ends: [start, end],
            curvature,
        });
        self.edges.len() - 1
    }

    /// Appends a face without adjacent cells and returns its index.
    pub fn add_face(&mut self, edges: Vec<usize>) -> usize {
        self.faces.push(FaceRecord {
            edges,
            ..FaceRecord::default()
        });
        self.faces.len() - 1
    }

    /// Appends a cell and records it in the adjacency slot of every bounding
    /// face. Returns the cell index.
    ///
    /// # Errors
    ///
    /// Returns an error if a face index is out of range or the requested
    /// slot already holds another cell.
    pub fn add_cell(&mut self, faces: &[(usize, Side)]) -> Result<usize, TopologyError> {
        let cell = self.cells.len();
        for &(face, side) in faces {
            self.attach(cell, face, side)?;
        }
        self.cells.push(faces.iter().map(|&(f, _)| f).collect());
        Ok(cell)
    }

    fn attach(&mut self, cell: usize, face: usize, side: Side) -> Result<(), TopologyError> {
        let record = self
            .faces
            .get_mut(face)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("face {face}")))?;
        let slot = record.slot_mut(side);
        match *slot {
            Some(other) if other != cell => Err(TopologyError::InvalidTopology(format!(
                "face {face} already has cell {other} on its {side:?} side"
            ))),
            _ => {
                *slot = Some(cell);
                Ok(())
            }
        }
    }

    /// Sets the boundary marker of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face index is out of range.
    pub fn set_boundary_type(&mut self, face: usize, boundary_type: i32) -> Result<(), TopologyError> {
        self.faces
            .get_mut(face)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("face {face}")))?
            .boundary_type = Some(boundary_type);
        Ok(())
    }

    /// Converts the flat arrays into an arena-backed [`Grid3D`].
    ///
    /// Cells are created empty first so that faces can refer to them; their
    /// face lists are filled in a final pass.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored index is out of range.
    pub fn assemble(&self) -> Result<Grid3D, TopologyError> {
        let mut grid = Grid3D::default();

        let vertex_ids: Vec<VertexId> = self
            .points
            .iter()
            .map(|p| grid.add_vertex(VertexData::new(*p)))
            .collect();

        let edge_ids = self
            .edges
            .iter()
            .map(|e| {
                let data = EdgeData {
                    start: resolve(&vertex_ids, e.ends[0], "vertex")?,
                    end: resolve(&vertex_ids, e.ends[1], "vertex")?,
                    curvature: e.curvature,
                };
                Ok(grid.add_edge(data))
            })
            .collect::<Result<Vec<EdgeId>, TopologyError>>()?;

        let cell_ids: Vec<CellId> = self
            .cells
            .iter()
            .map(|_| grid.add_cell(CellData::default()))
            .collect();

        let face_ids = self
            .faces
            .iter()
            .map(|f| {
                let data = FaceData {
                    edges: f
                        .edges
                        .iter()
                        .map(|&e| resolve(&edge_ids, e, "edge"))
                        .collect::<Result<_, _>>()?,
                    left: f.left.map(|c| resolve(&cell_ids, c, "cell")).transpose()?,
                    right: f.right.map(|c| resolve(&cell_ids, c, "cell")).transpose()?,
                    boundary_type: f.boundary_type,
                };
                Ok(grid.add_face(data))
            })
            .collect::<Result<Vec<FaceId>, TopologyError>>()?;

        for (faces, &cell_id) in self.cells.iter().zip(&cell_ids) {
            let resolved = faces
                .iter()
                .map(|&f| resolve(&face_ids, f, "face"))
                .collect::<Result<Vec<_>, _>>()?;
            grid.cell_mut(cell_id)?.faces = resolved;
        }

        Ok(grid)
    }
}

fn resolve<T: Copy>(ids: &[T], index: usize, what: &str) -> Result<T, TopologyError> {
    ids.get(index)
        .copied()
        .ok_or_else(|| TopologyError::EntityNotFound(format!("{what} {index}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Two tetrahedra glued along one triangle.
    fn glued_tetrahedra() -> SerializedGrid {
        let mut s = SerializedGrid::new();
        let p: Vec<usize> = [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.0, 0.0, -1.0),
        ]
        .iter()
        .map(|&(x, y, z)| s.add_point(Point3::new(x, y, z)))
        .collect();
        let mut e = |a: usize, b: usize| s.add_edge(p[a], p[b]);
        let e01 = e(0, 1);
        let e12 = e(1, 2);
        let e20 = e(2, 0);
        let e03 = e(0, 3);
        let e13 = e(1, 3);
        let e23 = e(2, 3);
        let e04 = e(0, 4);
        let e14 = e(1, 4);
        let e24 = e(2, 4);
        let base = s.add_face(vec![e01, e12, e20]);
        let up: Vec<usize> = vec![
            s.add_face(vec![e01, e13, e03]),
            s.add_face(vec![e12, e23, e13]),
            s.add_face(vec![e20, e03, e23]),
        ];
        let down: Vec<usize> = vec![
            s.add_face(vec![e01, e14, e04]),
            s.add_face(vec![e12, e24, e14]),
            s.add_face(vec![e20, e04, e24]),
        ];
        let mut top = vec![(base, Side::Left)];
        top.extend(up.iter().map(|&f| (f, Side::Left)));
        s.add_cell(&top).unwrap();
        let mut bottom = vec![(base, Side::Right)];
        bottom.extend(down.iter().map(|&f| (f, Side::Right)));
        s.add_cell(&bottom).unwrap();
        s
    }

    #[test]
    fn backfill_fills_both_slots_of_shared_face() {
        let s = glued_tetrahedra();
        assert_eq!(s.faces[0].left, Some(0));
        assert_eq!(s.faces[0].right, Some(1));
        assert_eq!(s.faces.iter().filter(|f| f.left.is_some() != f.right.is_some()).count(), 6);
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let mut s = glued_tetrahedra();
        assert!(s.add_cell(&[(0, Side::Left)]).is_err());
        assert!(s.add_cell(&[(99, Side::Left)]).is_err());
    }

    #[test]
    fn assemble_resolves_every_reference() {
        let mut s = glued_tetrahedra();
        s.set_boundary_type(1, 7).unwrap();
        let grid = s.assemble().unwrap();
        assert_eq!(grid.n_vertices(), 5);
        assert_eq!(grid.n_edges(), 9);
        assert_eq!(grid.n_faces(), 7);
        assert_eq!(grid.n_cells(), 2);

        let (shared_id, shared) = grid.faces().next().unwrap();
        assert_eq!(shared.n_cells(), 2);
        assert_eq!(shared.boundary_type, None);
        let left = grid.cell(shared.left.unwrap()).unwrap();
        assert!(left.faces.contains(&shared_id));
        assert_eq!(left.faces.len(), 4);

        let (_, marked) = grid.faces().nth(1).unwrap();
        assert_eq!(marked.boundary_type, Some(7));
        assert!(marked.is_boundary());

        for (id, _) in grid.faces() {
            assert_eq!(grid.face_vertices(id).unwrap().len(), 3);
        }
    }

    #[test]
    fn dangling_index_fails_assembly() {
        let mut s = SerializedGrid::new();
        s.add_point(Point3::origin());
        s.add_edge(0, 3);
        assert!(s.assemble().is_err());
    }
}
