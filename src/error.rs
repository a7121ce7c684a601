use thiserror::Error;

/// Top-level error type for volumetric grid construction.
#[derive(Debug, Error)]
pub enum VolgridError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Normal vertices were found on both sides of the revolution axis.
    #[error("all points should be located to one side of the revolution axis (vertex {vertex})")]
    ProfileStraddlesAxis { vertex: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to grid topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to grid construction operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`VolgridError`].
pub type Result<T, E = VolgridError> = std::result::Result<T, E>;
