use super::cell::CellId;
use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a face of a volumetric grid.
    pub struct FaceId;
}

/// Data associated with a grid face.
///
/// A face is a closed loop of edges. It separates at most two cells.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Bounding edges in loop order.
    pub edges: Vec<EdgeId>,
    /// Cell on the left side of the face.
    pub left: Option<CellId>,
    /// Cell on the right side of the face.
    pub right: Option<CellId>,
    /// Boundary marker; `None` for interior faces.
    pub boundary_type: Option<i32>,
}

impl FaceData {
    /// Number of adjacent cells (0, 1 or 2).
    #[must_use]
    pub fn n_cells(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Returns `true` if the face lies on the grid boundary.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.n_cells() < 2
    }
}
