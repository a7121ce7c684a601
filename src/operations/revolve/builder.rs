//! Array-building pipeline shared by both pole treatments.
//!
//! A *planar surface* is the 2D grid rotated to one of the requested
//! angles. Planar primitives lie on such a surface; lateral primitives
//! (rung edges and lateral faces) connect two neighbouring surfaces.

use std::collections::HashSet;
use std::f64::consts::TAU;

use tracing::debug;

use super::classify::{AxisClassification, CellKind, EdgeKind, RevolutionAxis};
use super::pole::PoleStrategy;
use crate::error::{OperationError, Result, TopologyError};
use crate::grid2d::IndexedGrid2D;
use crate::grid3d::{SerializedGrid, Side};
use crate::math::rotation::{axis_angle_matrix, rotate_planar_point};
use crate::math::Point3;

// ── Angular layout ─────────────────────────────────────────────────

/// Validated revolution angles.
#[derive(Debug, Clone)]
pub struct AngularLayout {
    radians: Vec<f64>,
    complete: bool,
}

impl AngularLayout {
    /// Converts angles given in degrees and detects a complete turn.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if fewer than two angles are
    /// given, the angles are not strictly increasing or they span more than
    /// a full turn.
    pub fn from_degrees(angles_deg: &[f64], tolerance: f64) -> Result<Self> {
        if angles_deg.len() < 2 {
            return Err(OperationError::InvalidInput(
                "revolution needs at least two angles".into(),
            )
            .into());
        }
        if angles_deg.iter().any(|a| !a.is_finite()) {
            return Err(OperationError::InvalidInput("angles must be finite".into()).into());
        }
        if angles_deg.windows(2).any(|w| w[1] <= w[0]) {
            return Err(OperationError::InvalidInput(
                "angles must be strictly increasing".into(),
            )
            .into());
        }

        let radians: Vec<f64> = angles_deg.iter().map(|a| a.to_radians()).collect();
        let span = radians[radians.len() - 1] - radians[0];
        if span > TAU + tolerance {
            return Err(OperationError::InvalidInput(format!(
                "angles span {} degrees, more than a full turn",
                span.to_degrees()
            ))
            .into());
        }

        let complete = (span - TAU).abs() < tolerance;
        Ok(Self { radians, complete })
    }

    /// Whether the last angle coincides with the first one.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of distinct planar surfaces.
    #[must_use]
    pub fn n_surfaces(&self) -> usize {
        if self.complete {
            self.radians.len() - 1
        } else {
            self.radians.len()
        }
    }

    /// Number of cell layers between neighbouring surfaces.
    #[must_use]
    pub fn n_slabs(&self) -> usize {
        self.radians.len() - 1
    }

    /// Surface index of position `j`, with the closing surface of a
    /// complete turn mapped back onto the first one.
    #[must_use]
    pub fn slice(&self, j: usize) -> usize {
        if j == self.n_surfaces() {
            0
        } else {
            j
        }
    }

    /// Rotation angle of surface `j` in radians.
    #[must_use]
    pub fn angle(&self, j: usize) -> f64 {
        self.radians[j]
    }
}

// ── Slice table ────────────────────────────────────────────────────

/// Output index of a 3D primitive, addressed by surface (or slab) and the
/// index of the 2D primitive it was built from.
#[derive(Debug, Clone)]
struct SliceTable {
    what: &'static str,
    width: usize,
    slots: Vec<Option<usize>>,
}

impl SliceTable {
    fn new(what: &'static str, rows: usize, width: usize) -> Self {
        Self {
            what,
            width,
            slots: vec![None; rows * width],
        }
    }

    fn set(&mut self, row: usize, col: usize, value: usize) {
        self.slots[row * self.width + col] = Some(value);
    }

    fn try_get(&self, row: usize, col: usize) -> Option<usize> {
        self.slots.get(row * self.width + col).copied().flatten()
    }

    fn get(&self, row: usize, col: usize) -> Result<usize, TopologyError> {
        self.try_get(row, col).ok_or_else(|| {
            TopologyError::EntityNotFound(format!("{} ({row}, {col})", self.what))
        })
    }
}

// ── Builder ────────────────────────────────────────────────────────

/// Emits the primitives of a revolved grid into a [`SerializedGrid`].
///
/// Output order is fixed: off-axis vertices surface by surface, then axis
/// vertices; planar edges of off-axis edges, then axis edges, then rung
/// edges; planar faces, then lateral faces; regular cells, then axis cells.
pub struct RevolveBuilder<'a> {
    grid: &'a IndexedGrid2D,
    classes: &'a AxisClassification,
    axis: &'a RevolutionAxis,
    layout: &'a AngularLayout,
    revolves: Vec<bool>,
    collapse: bool,

    out: SerializedGrid,
    vertices: SliceTable,
    planar_edges: SliceTable,
    rungs: SliceTable,
    planar_faces: SliceTable,
    lateral_faces: SliceTable,
}

impl<'a> RevolveBuilder<'a> {
    /// Prepares a builder for `grid`, asking `strategy` which edges revolve.
    #[must_use]
    pub fn new(
        grid: &'a IndexedGrid2D,
        classes: &'a AxisClassification,
        axis: &'a RevolutionAxis,
        layout: &'a AngularLayout,
        strategy: &dyn PoleStrategy,
    ) -> Self {
        let revolves = (0..grid.edges.len())
            .map(|e| strategy.do_revolve(e, grid, classes))
            .collect();
        let n_surf = layout.n_surfaces();
        let n_slabs = layout.n_slabs();
        Self {
            grid,
            classes,
            axis,
            layout,
            revolves,
            collapse: strategy.collapses_axis_cells(),
            out: SerializedGrid::new(),
            vertices: SliceTable::new("vertex", n_surf, grid.points.len()),
            planar_edges: SliceTable::new("planar edge", n_surf, grid.edges.len()),
            rungs: SliceTable::new("rung edge", n_slabs, grid.points.len()),
            planar_faces: SliceTable::new("planar face", n_surf, grid.cells.len()),
            lateral_faces: SliceTable::new("lateral face", n_slabs, grid.edges.len()),
        }
    }

    /// Runs every stage and returns the filled arrays.
    ///
    /// `start_marker` and `end_marker` are assigned to the planar faces of
    /// the first and last surface unless the revolution is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage refers to a primitive that an earlier
    /// stage did not produce.
    pub fn build(mut self, start_marker: i32, end_marker: i32) -> Result<SerializedGrid> {
        self.fill_vertices();
        self.fill_planar_edges()?;
        self.fill_rung_edges()?;
        self.fill_planar_faces()?;
        self.fill_normal_lateral_faces()?;
        self.fill_mixed_lateral_faces()?;
        self.fill_regular_cells()?;
        self.fill_axis_cells()?;
        self.side_boundary()?;
        if !self.layout.is_complete() {
            self.cap_boundary(start_marker, end_marker)?;
        }
        debug!(
            vertices = self.out.points.len(),
            edges = self.out.edges.len(),
            faces = self.out.faces.len(),
            cells = self.out.cells.len(),
            "revolved grid arrays built"
        );
        Ok(self.out)
    }

    fn drops_axis(&self) -> bool {
        self.collapse && self.layout.is_complete()
    }

    fn last_surface(&self) -> usize {
        self.layout.n_surfaces() - 1
    }

    fn fill_vertices(&mut self) {
        let dir = self.axis.direction3();
        for j in 0..self.layout.n_surfaces() {
            let rotation = axis_angle_matrix(&dir, self.layout.angle(j));
            for &v in &self.classes.normal_vertices {
                let p = rotate_planar_point(&self.grid.points[v], self.axis.anchor(), &rotation);
                let id = self.out.add_point(p);
                self.vertices.set(j, v, id);
            }
        }

        let kept: Vec<usize> = if self.drops_axis() {
            let mut used = HashSet::new();
            self.classes
                .mixed_edges
                .iter()
                .filter(|&&e| self.revolves[e])
                .map(|&e| {
                    let edge = &self.grid.edges[e];
                    self.classes.axis_end(e, edge.first, edge.last)
                })
                .filter(|&v| used.insert(v))
                .collect()
        } else {
            self.classes.axis_vertices.clone()
        };
        for v in kept {
            let p = self.grid.points[v];
            let id = self.out.add_point(Point3::new(p.x, p.y, 0.0));
            for j in 0..self.layout.n_surfaces() {
                self.vertices.set(j, v, id);
            }
        }
    }

    fn fill_planar_edges(&mut self) -> Result<()> {
        let n_surf = self.layout.n_surfaces();
        let last = self.last_surface();
        for &e in &self.classes.normal_edges {
            let revolves = self.revolves[e];
            if !revolves && self.layout.is_complete() {
                continue;
            }
            let edge = self.grid.edges[e];
            for j in 0..n_surf {
                if !revolves && j != 0 && j != last {
                    continue;
                }
                let a = self.vertices.get(j, edge.first)?;
                let b = self.vertices.get(j, edge.last)?;
                let id = self.out.add_edge(a, b);
                self.planar_edges.set(j, e, id);
            }
        }

        if self.drops_axis() {
            return Ok(());
        }
        for &e in &self.classes.axis_edges {
            let edge = self.grid.edges[e];
            let a = self.vertices.get(0, edge.first)?;
            let b = self.vertices.get(0, edge.last)?;
            let id = self.out.add_edge(a, b);
            for j in 0..n_surf {
                self.planar_edges.set(j, e, id);
            }
        }
        Ok(())
    }

    fn fill_rung_edges(&mut self) -> Result<()> {
        for &v in &self.classes.normal_vertices {
            let curvature = 1.0 / self.classes.measure[v].abs().sqrt();
            for j in 0..self.layout.n_slabs() {
                let a = self.vertices.get(j, v)?;
                let b = self.vertices.get(self.layout.slice(j + 1), v)?;
                let id = self.out.add_curved_edge(a, b, curvature);
                self.rungs.set(j, v, id);
            }
        }
        Ok(())
    }

    fn fill_planar_faces(&mut self) -> Result<()> {
        let last = self.last_surface();
        for (c, cell) in self.grid.cells.iter().enumerate() {
            let collapsed = self.collapse && self.classes.cell_kind[c] == CellKind::Axis;
            if collapsed && self.layout.is_complete() {
                continue;
            }
            for j in 0..self.layout.n_surfaces() {
                if collapsed && j != 0 && j != last {
                    continue;
                }
                let edges = cell
                    .edges
                    .iter()
                    .map(|&e| self.planar_edges.get(j, e))
                    .collect::<Result<Vec<_>, _>>()?;
                let id = self.out.add_face(edges);
                self.planar_faces.set(j, c, id);
            }
        }
        Ok(())
    }

    fn fill_normal_lateral_faces(&mut self) -> Result<()> {
        for &e in &self.classes.nn_edges {
            let edge = self.grid.edges[e];
            for j in 0..self.layout.n_slabs() {
                let next = self.layout.slice(j + 1);
                let loop_edges = vec![
                    self.planar_edges.get(j, e)?,
                    self.rungs.get(j, edge.last)?,
                    self.planar_edges.get(next, e)?,
                    self.rungs.get(j, edge.first)?,
                ];
                let id = self.out.add_face(loop_edges);
                self.lateral_faces.set(j, e, id);
            }
        }
        Ok(())
    }

    fn fill_mixed_lateral_faces(&mut self) -> Result<()> {
        for &e in &self.classes.mixed_edges {
            let edge = self.grid.edges[e];
            let kind = self.classes.edge_kind[e];
            let normal = self.classes.normal_end(e, edge.first, edge.last);

            if self.revolves[e] {
                for j in 0..self.layout.n_slabs() {
                    let next = self.layout.slice(j + 1);
                    let here = self.planar_edges.get(j, e)?;
                    let there = self.planar_edges.get(next, e)?;
                    let rung = self.rungs.get(j, normal)?;
                    let loop_edges = if kind == EdgeKind::AxisNormal {
                        vec![here, rung, there]
                    } else {
                        vec![here, there, rung]
                    };
                    let id = self.out.add_face(loop_edges);
                    self.lateral_faces.set(j, e, id);
                }
                continue;
            }

            // fan around the pole: one face for the whole sweep
            let complete = self.layout.is_complete();
            let slabs = 0..self.layout.n_slabs();
            let mut loop_edges = Vec::with_capacity(self.layout.n_slabs() + 2);
            if !complete {
                loop_edges.push(self.planar_edges.get(0, e)?);
            }
            if kind == EdgeKind::AxisNormal {
                for j in slabs.clone() {
                    loop_edges.push(self.rungs.get(j, normal)?);
                }
            }
            if !complete {
                loop_edges.push(self.planar_edges.get(self.last_surface(), e)?);
            }
            if kind == EdgeKind::NormalAxis {
                for j in slabs.rev() {
                    loop_edges.push(self.rungs.get(j, normal)?);
                }
            }
            let id = self.out.add_face(loop_edges);
            self.lateral_faces.set(0, e, id);
        }
        Ok(())
    }

    /// Lateral faces of the off-axis edges of cell `c` in slab `j`.
    fn slab_side_faces(&self, c: usize, j: usize) -> Result<Vec<(usize, Side)>> {
        let cell = &self.grid.cells[c];
        let mut faces = Vec::with_capacity(cell.edges.len());
        for (&e, &is_left) in cell.edges.iter().zip(&cell.is_left) {
            if self.classes.edge_kind[e].is_axis() {
                continue;
            }
            faces.push((self.lateral_faces.get(j, e)?, outward(is_left)));
        }
        Ok(faces)
    }

    fn add_slab_cell(&mut self, c: usize, j: usize) -> Result<()> {
        let mut faces = vec![
            (self.planar_faces.get(j, c)?, Side::Left),
            (self.planar_faces.get(self.layout.slice(j + 1), c)?, Side::Right),
        ];
        faces.extend(self.slab_side_faces(c, j)?);
        self.out.add_cell(&faces)?;
        Ok(())
    }

    fn fill_regular_cells(&mut self) -> Result<()> {
        let classes = self.classes;
        for &c in &classes.regular_cells {
            for j in 0..self.layout.n_slabs() {
                self.add_slab_cell(c, j)?;
            }
        }
        Ok(())
    }

    fn fill_axis_cells(&mut self) -> Result<()> {
        let classes = self.classes;
        for &c in &classes.axis_cells {
            if !self.collapse {
                for j in 0..self.layout.n_slabs() {
                    self.add_slab_cell(c, j)?;
                }
                continue;
            }

            let mut faces = Vec::new();
            if !self.layout.is_complete() {
                faces.push((self.planar_faces.get(0, c)?, Side::Left));
                faces.push((self.planar_faces.get(self.last_surface(), c)?, Side::Right));
            }
            let cell = &self.grid.cells[c];
            for (&e, &is_left) in cell.edges.iter().zip(&cell.is_left) {
                if self.classes.edge_kind[e].is_axis() {
                    continue;
                }
                let slabs = if self.revolves[e] { self.layout.n_slabs() } else { 1 };
                for j in 0..slabs {
                    faces.push((self.lateral_faces.get(j, e)?, outward(is_left)));
                }
            }
            self.out.add_cell(&faces)?;
        }
        Ok(())
    }

    fn side_boundary(&mut self) -> Result<()> {
        for (e, edge) in self.grid.edges.iter().enumerate() {
            if !edge.is_boundary() {
                continue;
            }
            for j in 0..self.layout.n_slabs() {
                if let Some(f) = self.lateral_faces.try_get(j, e) {
                    self.out.set_boundary_type(f, edge.boundary_type)?;
                }
            }
        }
        Ok(())
    }

    fn cap_boundary(&mut self, start_marker: i32, end_marker: i32) -> Result<()> {
        let last = self.last_surface();
        for c in 0..self.grid.cells.len() {
            if let Some(f) = self.planar_faces.try_get(0, c) {
                self.out.set_boundary_type(f, start_marker)?;
            }
            if let Some(f) = self.planar_faces.try_get(last, c) {
                self.out.set_boundary_type(f, end_marker)?;
            }
        }
        Ok(())
    }
}

/// Slot taken by a 3D cell in the lateral face built from one of its 2D
/// edges.
fn outward(is_left: bool) -> Side {
    if is_left {
        Side::Right
    } else {
        Side::Left
    }
}
