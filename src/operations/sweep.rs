//! Linear sweep of a planar grid along the z axis.

use tracing::info;

use super::ConstructionParams;
use crate::error::{OperationError, Result};
use crate::grid2d::Grid2D;
use crate::grid3d::{Grid3D, SerializedGrid, Side};
use crate::math::Point3;

/// Boundary marker chosen per 2D primitive index.
pub type MarkerFn = Box<dyn Fn(usize) -> i32>;

/// Marker policy for lateral boundary faces.
pub enum SideMarkers {
    /// Marker computed from the 2D edge index.
    Callback(MarkerFn),
    /// Same marker for every lateral boundary face.
    Constant(i32),
    /// Marker copied from the 2D boundary edge.
    Source,
}

/// Sweeps a 2D grid through a list of z coordinates.
///
/// One copy of the grid is placed at every z coordinate and each pair of
/// neighbouring copies bounds one layer of prismatic cells.
pub struct Sweep {
    zcoords: Vec<f64>,
    bottom: MarkerFn,
    top: MarkerFn,
    side: SideMarkers,
    params: ConstructionParams,
}

impl Sweep {
    /// Creates a new `Sweep` operation. Bottom, top and side faces are
    /// marked 1, 2 and 3.
    #[must_use]
    pub fn new(zcoords: Vec<f64>) -> Self {
        Self {
            zcoords,
            bottom: Box::new(|_| 1),
            top: Box::new(|_| 2),
            side: SideMarkers::Constant(3),
            params: ConstructionParams::default(),
        }
    }

    /// Marks the bottom faces by 2D cell index.
    #[must_use]
    pub fn with_bottom_markers(mut self, f: impl Fn(usize) -> i32 + 'static) -> Self {
        self.bottom = Box::new(f);
        self
    }

    /// Marks the top faces by 2D cell index.
    #[must_use]
    pub fn with_top_markers(mut self, f: impl Fn(usize) -> i32 + 'static) -> Self {
        self.top = Box::new(f);
        self
    }

    /// Marks the lateral boundary faces by 2D edge index.
    #[must_use]
    pub fn with_side_markers(mut self, f: impl Fn(usize) -> i32 + 'static) -> Self {
        self.side = SideMarkers::Callback(Box::new(f));
        self
    }

    /// Uses one marker for all lateral boundary faces.
    #[must_use]
    pub fn with_constant_side_marker(mut self, boundary_type: i32) -> Self {
        self.side = SideMarkers::Constant(boundary_type);
        self
    }

    /// Copies lateral markers from the 2D boundary edges.
    #[must_use]
    pub fn with_source_side_markers(mut self) -> Self {
        self.side = SideMarkers::Source;
        self
    }

    /// Overrides the construction tolerances.
    #[must_use]
    pub fn with_params(mut self, params: ConstructionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the sweep and returns the assembled 3D grid.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if fewer than two z values
    /// are given, they are not increasing by more than the tolerance, or
    /// the grid has no cells.
    pub fn execute(&self, grid: &Grid2D) -> Result<Grid3D> {
        self.validate()?;
        if grid.n_cells() == 0 {
            return Err(OperationError::InvalidInput("grid has no cells".into()).into());
        }
        let g = grid.enumerate_all()?;
        let (n2p, n2e, n2c) = (g.points.len(), g.edges.len(), g.cells.len());
        let nz = self.zcoords.len();
        let mut out = SerializedGrid::new();

        for &z in &self.zcoords {
            for p in &g.points {
                out.add_point(Point3::new(p.x, p.y, z));
            }
        }

        // xy edges layer by layer, then z edges
        for i in 0..nz {
            for e in &g.edges {
                out.add_edge(i * n2p + e.first, i * n2p + e.last);
            }
        }
        let z_edge = |i: usize, v: usize| nz * n2e + i * n2p + v;
        for i in 0..nz - 1 {
            for v in 0..n2p {
                out.add_edge(i * n2p + v, (i + 1) * n2p + v);
            }
        }

        for i in 0..nz {
            for cell in &g.cells {
                out.add_face(cell.edges.iter().map(|&e| i * n2e + e).collect());
            }
        }
        let z_face = |i: usize, e: usize| nz * n2c + i * n2e + e;
        for i in 0..nz - 1 {
            for (e, edge) in g.edges.iter().enumerate() {
                out.add_face(vec![
                    i * n2e + e,
                    z_edge(i, edge.last),
                    (i + 1) * n2e + e,
                    z_edge(i, edge.first),
                ]);
            }
        }

        for i in 0..nz - 1 {
            for (c, cell) in g.cells.iter().enumerate() {
                let mut faces = vec![(i * n2c + c, Side::Right), ((i + 1) * n2c + c, Side::Left)];
                for (&e, &is_left) in cell.edges.iter().zip(&cell.is_left) {
                    let side = if is_left { Side::Left } else { Side::Right };
                    faces.push((z_face(i, e), side));
                }
                out.add_cell(&faces)?;
            }
        }

        for c in 0..n2c {
            out.set_boundary_type(c, (self.bottom)(c))?;
            out.set_boundary_type((nz - 1) * n2c + c, (self.top)(c))?;
        }
        for (e, edge) in g.edges.iter().enumerate() {
            if !edge.is_boundary() {
                continue;
            }
            let marker = match &self.side {
                SideMarkers::Callback(f) => f(e),
                SideMarkers::Constant(bt) => *bt,
                SideMarkers::Source => edge.boundary_type,
            };
            for i in 0..nz - 1 {
                out.set_boundary_type(z_face(i, e), marker)?;
            }
        }

        let result = out.assemble()?;
        info!(
            cells_2d = n2c,
            layers = nz - 1,
            vertices = result.n_vertices(),
            edges = result.n_edges(),
            faces = result.n_faces(),
            cells = result.n_cells(),
            "swept grid"
        );
        Ok(result)
    }

    fn validate(&self) -> Result<()> {
        if self.zcoords.len() < 2 {
            return Err(
                OperationError::InvalidInput("sweep needs at least two z values".into()).into(),
            );
        }
        if self.zcoords.iter().any(|z| !z.is_finite()) {
            return Err(OperationError::InvalidInput("z values must be finite".into()).into());
        }
        let tol = self.params.tolerance;
        if self.zcoords.windows(2).any(|w| w[1] - w[0] <= tol) {
            return Err(OperationError::InvalidInput(
                "z values must be strictly increasing".into(),
            )
            .into());
        }
        Ok(())
    }
}
