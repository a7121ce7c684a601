//! Revolution of a planar grid around an in-plane axis.
//!
//! Every off-axis vertex of the 2D grid is rotated to each requested angle,
//! producing one *planar surface* per angle. Neighbouring surfaces are
//! joined by rung edges (arcs) and lateral faces, and every pair of
//! surfaces bounds one layer of 3D cells. Primitives lying on the axis are
//! emitted once and shared by all surfaces; how the degenerate cells
//! around the axis are built is chosen by [`PoleMode`].

mod builder;
mod classify;
mod pole;

pub use builder::AngularLayout;
pub use classify::{AxisClassification, CellKind, EdgeKind, RevolutionAxis};
pub use pole::{CollapsedPole, PoleMode, PoleStrategy, TriangulatedPole};

use tracing::{debug, info};

use self::builder::RevolveBuilder;
use super::ConstructionParams;
use crate::error::{OperationError, Result};
use crate::grid2d::{CanonicalEdges, Grid2D};
use crate::grid3d::Grid3D;
use crate::math::Point2;

/// Revolves a 2D grid around an axis through a list of angles.
///
/// Angles are given in degrees and must be strictly increasing. If the
/// last angle is a full turn away from the first, the last surface is
/// identified with the first and no cap faces are produced.
#[derive(Debug, Clone)]
pub struct Revolve {
    angles_deg: Vec<f64>,
    axis_start: Point2,
    axis_end: Point2,
    pole: PoleMode,
    caps: (i32, i32),
    params: ConstructionParams,
}

impl Revolve {
    /// Creates a new `Revolve` operation around the axis running from
    /// `axis_start` to `axis_end`.
    #[must_use]
    pub fn new(angles_deg: Vec<f64>, axis_start: Point2, axis_end: Point2) -> Self {
        Self {
            angles_deg,
            axis_start,
            axis_end,
            pole: PoleMode::default(),
            caps: (0, 0),
            params: ConstructionParams::default(),
        }
    }

    /// Creates a complete revolution split into `n_steps` equal slabs.
    #[must_use]
    pub fn full_turn(n_steps: usize, axis_start: Point2, axis_end: Point2) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let step = 360.0 / n_steps.max(1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let angles = (0..=n_steps).map(|i| i as f64 * step).collect();
        Self::new(angles, axis_start, axis_end)
    }

    /// Sets the treatment of cells touching the axis.
    #[must_use]
    pub fn with_pole(mut self, pole: PoleMode) -> Self {
        self.pole = pole;
        self
    }

    /// Sets the boundary markers of the first and last planar surface.
    ///
    /// Ignored for complete revolutions.
    #[must_use]
    pub fn with_caps(mut self, start_marker: i32, end_marker: i32) -> Self {
        self.caps = (start_marker, end_marker);
        self
    }

    /// Overrides the construction tolerances.
    #[must_use]
    pub fn with_params(mut self, params: ConstructionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the revolution and returns the assembled 3D grid.
    ///
    /// Edges of `grid` are temporarily re-oriented so that each runs from
    /// its lower to its higher vertex index. Their original orientation is
    /// restored before this function returns, whether it succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the angles are invalid, the axis points coincide,
    /// the grid is empty, or off-axis vertices lie on both sides of the axis.
    pub fn execute(&self, grid: &mut Grid2D) -> Result<Grid3D> {
        let tolerance = self.params.tolerance;
        let layout = AngularLayout::from_degrees(&self.angles_deg, tolerance)?;
        let axis = RevolutionAxis::through(self.axis_start, self.axis_end, tolerance)?;
        if grid.n_cells() == 0 {
            return Err(OperationError::InvalidInput("grid has no cells".into()).into());
        }

        let canonical = CanonicalEdges::new(grid)?;
        debug!(reverted = canonical.n_reverted(), "canonicalized edge directions");
        let indexed = canonical.enumerate_all()?;
        let classes = AxisClassification::classify(&indexed, &axis, tolerance)?;
        let strategy = self.pole.strategy();
        let serialized = RevolveBuilder::new(&indexed, &classes, &axis, &layout, strategy.as_ref())
            .build(self.caps.0, self.caps.1)?;
        drop(canonical);

        let result = serialized.assemble()?;
        info!(
            cells_2d = indexed.cells.len(),
            surfaces = layout.n_surfaces(),
            complete = layout.is_complete(),
            pole = ?self.pole,
            vertices = result.n_vertices(),
            edges = result.n_edges(),
            faces = result.n_faces(),
            cells = result.n_cells(),
            "revolved grid"
        );
        Ok(result)
    }
}
