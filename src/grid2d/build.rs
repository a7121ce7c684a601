use std::collections::HashMap;

use super::{Cell2Data, Edge2Data, Edge2Id, Grid2D, Vertex2Data, Vertex2Id};
use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::math::{Point2, TOLERANCE};

impl Grid2D {
    /// Builds a grid from a point list and cells given as loops of point indices.
    ///
    /// Edges shared by two cells are created once. Every loop is re-oriented
    /// counter-clockwise so that each cell ends up on the left of the edges it
    /// introduced and on the right of the edges it shares in reverse.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell has fewer than 3 vertices, references a
    /// missing point, has zero area, or if an edge is claimed by more than two
    /// cells.
    pub fn from_polygons(points: &[Point2], cells: &[Vec<usize>]) -> Result<Self> {
        let mut grid = Self::new();
        let vids: Vec<Vertex2Id> = points
            .iter()
            .map(|p| grid.add_vertex(Vertex2Data::new(*p)))
            .collect();
        let mut edge_map: HashMap<(usize, usize), Edge2Id> = HashMap::new();

        for (ci, cell) in cells.iter().enumerate() {
            if cell.len() < 3 {
                return Err(OperationError::InvalidInput(format!(
                    "cell {ci} has fewer than 3 vertices"
                ))
                .into());
            }
            if let Some(&bad) = cell.iter().find(|&&v| v >= points.len()) {
                return Err(OperationError::InvalidInput(format!(
                    "cell {ci} references missing point {bad}"
                ))
                .into());
            }
            let area = loop_area(points, cell);
            if area.abs() < TOLERANCE {
                return Err(GeometryError::Degenerate(format!("cell {ci} has zero area")).into());
            }
            let ordered: Vec<usize> = if area > 0.0 {
                cell.clone()
            } else {
                cell.iter().rev().copied().collect()
            };

            let cell_id = grid.add_cell(Cell2Data::default());
            let mut cell_edges = Vec::with_capacity(ordered.len());
            for k in 0..ordered.len() {
                let a = ordered[k];
                let b = ordered[(k + 1) % ordered.len()];
                if a == b {
                    return Err(OperationError::InvalidInput(format!(
                        "cell {ci} repeats point {a}"
                    ))
                    .into());
                }
                let key = (a.min(b), a.max(b));
                let edge_id = if let Some(&id) = edge_map.get(&key) {
                    let edge = grid.edge_mut(id)?;
                    let slot = if edge.first == vids[a] {
                        &mut edge.left
                    } else {
                        &mut edge.right
                    };
                    if slot.is_some() {
                        return Err(TopologyError::InvalidTopology(format!(
                            "edge {a}-{b} is shared by more than two cells"
                        ))
                        .into());
                    }
                    *slot = Some(cell_id);
                    id
                } else {
                    let mut data = Edge2Data::new(vids[a], vids[b]);
                    data.left = Some(cell_id);
                    let id = grid.add_edge(data);
                    edge_map.insert(key, id);
                    id
                };
                cell_edges.push(edge_id);
            }
            grid.cell_mut(cell_id)?.edges = cell_edges;
        }
        Ok(grid)
    }

    /// Builds a structured quadrilateral grid on the tensor product of two
    /// increasing coordinate sequences.
    ///
    /// Points are numbered row by row (x fastest), cells likewise.
    ///
    /// # Errors
    ///
    /// Returns an error if either sequence has fewer than two values or is
    /// not strictly increasing.
    pub fn rectangular(xs: &[f64], ys: &[f64]) -> Result<Self> {
        for (name, seq) in [("x", xs), ("y", ys)] {
            if seq.len() < 2 || seq.windows(2).any(|w| w[1] - w[0] < TOLERANCE) {
                return Err(OperationError::InvalidInput(format!(
                    "{name} coordinates must contain at least two strictly increasing values"
                ))
                .into());
            }
        }
        let nx = xs.len();
        let points: Vec<Point2> = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| Point2::new(x, y)))
            .collect();
        let mut cells = Vec::with_capacity((nx - 1) * (ys.len() - 1));
        for j in 0..ys.len() - 1 {
            for i in 0..nx - 1 {
                let p = j * nx + i;
                cells.push(vec![p, p + 1, p + 1 + nx, p + nx]);
            }
        }
        Self::from_polygons(&points, &cells)
    }
}

/// Signed area enclosed by a cell loop, positive for counter-clockwise order.
///
/// Accumulated as a triangle fan around the loop's first point.
fn loop_area(points: &[Point2], cell: &[usize]) -> f64 {
    let Some(&first) = cell.first() else {
        return 0.0;
    };
    let origin = points[first];
    let twice: f64 = cell
        .windows(2)
        .skip(1)
        .map(|w| (points[w[0]] - origin).perp(&(points[w[1]] - origin)))
        .sum();
    0.5 * twice
}
