use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge of a volumetric grid.
    pub struct EdgeId;
}

/// Data associated with a grid edge.
///
/// Edges are straight segments. Edges produced by revolving a vertex around
/// an axis additionally remember the curvature of the circle they
/// approximate.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// `1 / radius` of the generating circle, `0.0` for planar edges.
    pub curvature: f64,
}
