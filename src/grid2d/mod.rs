//! Planar source grids.
//!
//! A [`Grid2D`] is the read-mostly input of every sweep operation. Its
//! primitives live in arenas keyed by generational ids; dense integer
//! numbering is produced on demand by [`Grid2D::enumerate_all`].

mod build;
mod canonical;
mod indexed;

pub use canonical::CanonicalEdges;
pub use indexed::{IndexedCell, IndexedEdge, IndexedGrid2D};

use crate::error::TopologyError;
use crate::math::Point2;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a vertex of a planar grid.
    pub struct Vertex2Id;
}

slotmap::new_key_type! {
    /// Unique identifier for an edge of a planar grid.
    pub struct Edge2Id;
}

slotmap::new_key_type! {
    /// Unique identifier for a cell of a planar grid.
    pub struct Cell2Id;
}

/// Data associated with a planar grid vertex.
#[derive(Debug, Clone)]
pub struct Vertex2Data {
    /// Position in the grid plane.
    pub point: Point2,
}

impl Vertex2Data {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }
}

/// Data associated with a planar grid edge.
///
/// The left cell is the one seen on the left hand side when walking from
/// `first` to `last`.
#[derive(Debug, Clone)]
pub struct Edge2Data {
    /// Start vertex.
    pub first: Vertex2Id,
    /// End vertex.
    pub last: Vertex2Id,
    /// Cell on the left of `first -> last`.
    pub left: Option<Cell2Id>,
    /// Cell on the right of `first -> last`.
    pub right: Option<Cell2Id>,
    /// Boundary marker, meaningful for boundary edges only.
    pub boundary_type: i32,
}

impl Edge2Data {
    /// Creates a new edge without adjacent cells.
    #[must_use]
    pub fn new(first: Vertex2Id, last: Vertex2Id) -> Self {
        Self {
            first,
            last,
            left: None,
            right: None,
            boundary_type: 0,
        }
    }

    /// Returns `true` if at least one side of the edge has no cell.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }

    /// Flips the edge direction. Adjacent cells swap sides with it.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.first, &mut self.last);
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

/// Data associated with a planar grid cell.
#[derive(Debug, Clone, Default)]
pub struct Cell2Data {
    /// Bounding edges in loop order.
    pub edges: Vec<Edge2Id>,
}

/// Arena that owns all primitives of a planar grid.
#[derive(Debug, Clone, Default)]
pub struct Grid2D {
    vertices: SlotMap<Vertex2Id, Vertex2Data>,
    edges: SlotMap<Edge2Id, Edge2Data>,
    cells: SlotMap<Cell2Id, Cell2Data>,
}

impl Grid2D {
    /// Creates a new, empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

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

    /// Number of cells.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: Vertex2Data) -> Vertex2Id {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn vertex(&self, id: Vertex2Id) -> Result<&Vertex2Data, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("2d vertex".into()))
    }

    /// Iterates over vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (Vertex2Id, &Vertex2Data)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: Edge2Data) -> Edge2Id {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn edge(&self, id: Edge2Id) -> Result<&Edge2Data, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("2d edge".into()))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn edge_mut(&mut self, id: Edge2Id) -> Result<&mut Edge2Data, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("2d edge".into()))
    }

    /// Iterates over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Edge2Id, &Edge2Data)> {
        self.edges.iter()
    }

    /// Sets the boundary marker of a single edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found in the grid.
    pub fn set_boundary_type(&mut self, id: Edge2Id, boundary_type: i32) -> Result<(), TopologyError> {
        self.edge_mut(id)?.boundary_type = boundary_type;
        Ok(())
    }

    /// Sets the same boundary marker on every boundary edge.
    pub fn set_boundary_types(&mut self, boundary_type: i32) {
        for edge in self.edges.values_mut().filter(|e| e.is_boundary()) {
            edge.boundary_type = boundary_type;
        }
    }

    // --- Cell operations ---

    /// Inserts a cell and returns its ID.
    pub fn add_cell(&mut self, data: Cell2Data) -> Cell2Id {
        self.cells.insert(data)
    }

    /// Returns a reference to the cell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn cell(&self, id: Cell2Id) -> Result<&Cell2Data, TopologyError> {
        self.cells
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("2d cell".into()))
    }

    /// Returns a mutable reference to the cell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the grid.
    pub fn cell_mut(&mut self, id: Cell2Id) -> Result<&mut Cell2Data, TopologyError> {
        self.cells
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("2d cell".into()))
    }

    /// Iterates over cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell2Id, &Cell2Data)> {
        self.cells.iter()
    }
}
