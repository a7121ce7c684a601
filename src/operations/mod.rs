//! Grid construction operations.
//!
//! Each operation is a struct configured through `new` and builder-style
//! setters, then run with `execute`.

pub mod creation;
pub mod query;
pub mod revolve;
pub mod sweep;

use crate::math::TOLERANCE;

/// Numeric parameters shared by construction operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructionParams {
    /// Distance below which points are treated as coincident. Squared
    /// distances are compared against its square.
    pub tolerance: f64,
}

impl Default for ConstructionParams {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
        }
    }
}
