//! Classification of planar primitives against the revolution axis.

use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::grid2d::IndexedGrid2D;
use crate::math::line_2d::signed_squared_distance;
use crate::math::{Point2, Vector2, Vector3};

/// Revolution axis lying in the grid plane.
#[derive(Debug, Clone, Copy)]
pub struct RevolutionAxis {
    anchor: Point2,
    dir: Vector2,
}

impl RevolutionAxis {
    /// Creates the axis running from `start` towards `end`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the points coincide.
    pub fn through(start: Point2, end: Point2, tolerance: f64) -> Result<Self> {
        let v = end - start;
        let len = v.norm();
        if len < tolerance {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            anchor: start,
            dir: v / len,
        })
    }

    /// A point on the axis.
    #[must_use]
    pub fn anchor(&self) -> &Point2 {
        &self.anchor
    }

    /// Unit axis direction embedded in 3D (`z = 0`).
    #[must_use]
    pub fn direction3(&self) -> Vector3 {
        Vector3::new(self.dir.x, self.dir.y, 0.0)
    }

    /// Signed squared distance of `point` from the axis.
    #[must_use]
    pub fn measure(&self, point: &Point2) -> f64 {
        signed_squared_distance(point, &self.anchor, &self.dir)
    }
}

/// Position of an edge relative to the axis.
///
/// Mixed kinds are named after the direction of travel from `first` to
/// `last`, so `NormalAxis` runs from an off-axis vertex onto the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Both end points on the axis.
    Axis,
    /// Both end points off the axis.
    NormalNormal,
    /// Off-axis first vertex, on-axis last vertex.
    NormalAxis,
    /// On-axis first vertex, off-axis last vertex.
    AxisNormal,
}

impl EdgeKind {
    fn from_ends(first_normal: bool, last_normal: bool) -> Self {
        match (first_normal, last_normal) {
            (false, false) => EdgeKind::Axis,
            (true, true) => EdgeKind::NormalNormal,
            (true, false) => EdgeKind::NormalAxis,
            (false, true) => EdgeKind::AxisNormal,
        }
    }

    /// Returns `true` for edges lying on the axis.
    #[must_use]
    pub fn is_axis(self) -> bool {
        self == EdgeKind::Axis
    }

    /// Returns `true` for edges with exactly one end point on the axis.
    #[must_use]
    pub fn is_mixed(self) -> bool {
        matches!(self, EdgeKind::NormalAxis | EdgeKind::AxisNormal)
    }
}

/// Position of a cell relative to the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// At least one bounding edge lies on the axis.
    Axis,
    /// No bounding edge lies on the axis.
    Regular,
}

/// Axis labels of every vertex, edge and cell of a planar grid.
#[derive(Debug, Clone, Default)]
pub struct AxisClassification {
    /// Signed squared axis distance per vertex.
    pub measure: Vec<f64>,
    pub is_normal_vertex: Vec<bool>,
    pub normal_vertices: Vec<usize>,
    pub axis_vertices: Vec<usize>,
    pub edge_kind: Vec<EdgeKind>,
    /// Every edge that is not an axis edge.
    pub normal_edges: Vec<usize>,
    pub nn_edges: Vec<usize>,
    pub mixed_edges: Vec<usize>,
    pub axis_edges: Vec<usize>,
    pub cell_kind: Vec<CellKind>,
    pub regular_cells: Vec<usize>,
    pub axis_cells: Vec<usize>,
}

impl AxisClassification {
    /// Labels every primitive of `grid` against `axis`.
    ///
    /// A vertex whose squared distance is below `tolerance²` lies on the
    /// axis. All other vertices must lie on one side of it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ProfileStraddlesAxis`] if off-axis vertices
    /// are found on both sides.
    pub fn classify(grid: &IndexedGrid2D, axis: &RevolutionAxis, tolerance: f64) -> Result<Self> {
        let mut c = Self::default();
        let eps2 = tolerance * tolerance;

        let mut side = 0_i8;
        for (i, p) in grid.points.iter().enumerate() {
            let m = axis.measure(p);
            c.measure.push(m);
            if m.abs() < eps2 {
                c.is_normal_vertex.push(false);
                c.axis_vertices.push(i);
                continue;
            }
            let sign = if m > 0.0 { 1 } else { -1 };
            if side == 0 {
                side = sign;
            } else if sign != side {
                warn!(vertex = i, measure = m, "profile crosses the revolution axis");
                return Err(GeometryError::ProfileStraddlesAxis { vertex: i }.into());
            }
            c.is_normal_vertex.push(true);
            c.normal_vertices.push(i);
        }

        for (i, e) in grid.edges.iter().enumerate() {
            let kind = EdgeKind::from_ends(c.is_normal_vertex[e.first], c.is_normal_vertex[e.last]);
            c.edge_kind.push(kind);
            match kind {
                EdgeKind::Axis => c.axis_edges.push(i),
                EdgeKind::NormalNormal => {
                    c.normal_edges.push(i);
                    c.nn_edges.push(i);
                }
                EdgeKind::NormalAxis | EdgeKind::AxisNormal => {
                    c.normal_edges.push(i);
                    c.mixed_edges.push(i);
                }
            }
        }

        for (i, cell) in grid.cells.iter().enumerate() {
            if cell.edges.iter().any(|&e| c.edge_kind[e].is_axis()) {
                c.cell_kind.push(CellKind::Axis);
                c.axis_cells.push(i);
            } else {
                c.cell_kind.push(CellKind::Regular);
                c.regular_cells.push(i);
            }
        }

        debug!(
            normal_vertices = c.normal_vertices.len(),
            axis_vertices = c.axis_vertices.len(),
            mixed_edges = c.mixed_edges.len(),
            axis_edges = c.axis_edges.len(),
            axis_cells = c.axis_cells.len(),
            "classified planar grid against revolution axis"
        );
        Ok(c)
    }

    /// Off-axis end point of a mixed edge, given its end points.
    #[must_use]
    pub fn normal_end(&self, edge: usize, first: usize, last: usize) -> usize {
        if self.edge_kind[edge] == EdgeKind::NormalAxis {
            first
        } else {
            last
        }
    }

    /// On-axis end point of a mixed edge, given its end points.
    #[must_use]
    pub fn axis_end(&self, edge: usize, first: usize, last: usize) -> usize {
        if self.edge_kind[edge] == EdgeKind::NormalAxis {
            last
        } else {
            first
        }
    }
}
