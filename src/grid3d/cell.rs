use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a cell of a volumetric grid.
    pub struct CellId;
}

/// Data associated with a grid cell.
///
/// Cells carry no shape tag. Consumers infer the shape from the counts of
/// bounding faces, edges and vertices.
#[derive(Debug, Clone, Default)]
pub struct CellData {
    /// Bounding faces, unordered.
    pub faces: Vec<FaceId>,
}
