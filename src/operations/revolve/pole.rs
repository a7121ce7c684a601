//! Treatment of the degenerate region around the revolution axis.

use super::classify::{AxisClassification, CellKind, EdgeKind};
use crate::grid2d::IndexedGrid2D;

/// Selects how primitives touching the axis are revolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoleMode {
    /// Every off-axis edge produces one lateral face per slab. Axis cells
    /// become one wedge-like cell per slab.
    #[default]
    Triangulated,
    /// Mixed edges whose cells all touch the axis are merged into a single
    /// fan face, and every axis cell becomes one cell spanning all slabs.
    Collapsed,
}

impl PoleMode {
    /// Returns the strategy object implementing this mode.
    #[must_use]
    pub fn strategy(self) -> Box<dyn PoleStrategy> {
        match self {
            PoleMode::Triangulated => Box::new(TriangulatedPole),
            PoleMode::Collapsed => Box::new(CollapsedPole),
        }
    }
}

/// Decisions that differ between pole treatments.
///
/// Everything else in the revolution pipeline is shared.
pub trait PoleStrategy {
    /// Whether `edge` gets a full ring of lateral faces (one per slab).
    ///
    /// Axis edges never revolve. Mixed edges that do not revolve are merged
    /// into a single fan face spanning all slabs.
    fn do_revolve(&self, edge: usize, grid: &IndexedGrid2D, classes: &AxisClassification) -> bool;

    /// Whether every axis cell collapses into a single cell spanning all
    /// slabs, keeping planar faces on the first and last slice only.
    fn collapses_axis_cells(&self) -> bool;
}

/// Revolves every off-axis edge.
#[derive(Debug, Clone, Copy)]
pub struct TriangulatedPole;

impl PoleStrategy for TriangulatedPole {
    fn do_revolve(&self, edge: usize, _grid: &IndexedGrid2D, classes: &AxisClassification) -> bool {
        !classes.edge_kind[edge].is_axis()
    }

    fn collapses_axis_cells(&self) -> bool {
        false
    }
}

/// Revolves a mixed edge only when one of its cells is regular.
#[derive(Debug, Clone, Copy)]
pub struct CollapsedPole;

impl PoleStrategy for CollapsedPole {
    fn do_revolve(&self, edge: usize, grid: &IndexedGrid2D, classes: &AxisClassification) -> bool {
        let kind = classes.edge_kind[edge];
        if !kind.is_mixed() {
            return kind == EdgeKind::NormalNormal;
        }
        let e = &grid.edges[edge];
        [e.left, e.right]
            .into_iter()
            .flatten()
            .any(|c| classes.cell_kind[c] == CellKind::Regular)
    }

    fn collapses_axis_cells(&self) -> bool {
        true
    }
}
