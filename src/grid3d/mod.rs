//! Volumetric grids.
//!
//! [`Grid3D`] owns every vertex, edge, face and cell produced by a
//! construction call. Primitives reference each other through typed
//! generational ids, so faces can point back at their cells without
//! reference cycles.

pub mod cell;
pub mod edge;
pub mod face;
pub mod serialized;
pub mod vertex;

pub use cell::{CellData, CellId};
pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use serialized::{FaceRecord, SerializedGrid, Side};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Aggregate that owns all primitives of a volumetric grid.
///
/// A grid is filled once by the assembler and is read-only afterwards.
#[derive(Debug, Default)]
pub struct Grid3D {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    cells: SlotMap<CellId, CellData>,
}

impl Grid3D {
    /// Number of vertices.
    #[must_use]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of cells.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    // --- Vertex operations ---

    pub(crate) fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates over vertices in construction order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    pub(crate) fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates over edges in construction order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- Face operations ---

    pub(crate) fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Iterates over faces in construction order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Returns the vertices of a face in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its edges is missing, or if its
    /// edges do not form a closed loop.
    pub fn face_vertices(&self, id: FaceId) -> Result<Vec<VertexId>, TopologyError> {
        let edges = self
            .face(id)?
            .edges
            .iter()
            .map(|&e| self.edge(e))
            .collect::<Result<Vec<_>, _>>()?;
        let not_closed = || TopologyError::InvalidTopology("face edges do not form a loop".into());
        let (&first, rest) = edges.split_first().ok_or_else(not_closed)?;
        let second = rest.first().copied().ok_or_else(not_closed)?;

        let touches = |e: &EdgeData, v: VertexId| e.start == v || e.end == v;
        let mut current = if touches(second, first.end) {
            first.end
        } else if touches(second, first.start) {
            first.start
        } else {
            return Err(not_closed());
        };
        let mut loop_vertices = Vec::with_capacity(edges.len());
        loop_vertices.push(if current == first.end { first.start } else { first.end });
        for &edge in rest {
            if !touches(edge, current) {
                return Err(not_closed());
            }
            loop_vertices.push(current);
            current = if edge.start == current { edge.end } else { edge.start };
        }
        if current != loop_vertices[0] {
            return Err(not_closed());
        }
        Ok(loop_vertices)
    }

    // --- Cell operations ---

    pub(crate) fn add_cell(&mut self, data: CellData) -> CellId {
        self.cells.insert(data)
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> Result<&mut CellData, TopologyError> {
        self.cells
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("cell".into()))
    }

    /// Returns a reference to the cell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn cell(&self, id: CellId) -> Result<&CellData, TopologyError> {
        self.cells
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("cell".into()))
    }

    /// Iterates over cells in construction order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &CellData)> {
        self.cells.iter()
    }
}
