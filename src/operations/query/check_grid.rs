use tracing::debug;

use crate::grid3d::{CellId, FaceId, Grid3D};

/// Summary of the structural consistency of a [`Grid3D`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridReport {
    /// Faces with a cell on both sides.
    pub interior_faces: usize,
    /// Faces with a cell on one side.
    pub boundary_faces: usize,
    /// Faces without any adjacent cell.
    pub orphan_faces: Vec<FaceId>,
    /// Faces bounded by fewer than three edges.
    pub short_faces: Vec<FaceId>,
    /// Faces whose edges do not form a closed loop.
    pub open_faces: Vec<FaceId>,
    /// Boundary faces without a boundary marker.
    pub unmarked_boundary_faces: Vec<FaceId>,
    /// Cells bounded by fewer than three faces.
    pub thin_cells: Vec<CellId>,
    /// Face and cell pairs where only one side lists the other.
    pub broken_links: Vec<(FaceId, CellId)>,
}

impl GridReport {
    /// Returns `true` if no defect was found.
    ///
    /// Collapsed pole cells of a complete revolution may legitimately be
    /// bounded by two faces, so thin cells alone do not fail the check.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.orphan_faces.is_empty()
            && self.short_faces.is_empty()
            && self.open_faces.is_empty()
            && self.broken_links.is_empty()
    }
}

/// Cross-checks face loops and face/cell adjacency of a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckGrid;

impl CheckGrid {
    /// Creates a new `CheckGrid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the check and returns the collected defects.
    #[must_use]
    pub fn execute(&self, grid: &Grid3D) -> GridReport {
        let mut report = GridReport::default();

        for (fid, face) in grid.faces() {
            match face.n_cells() {
                2 => report.interior_faces += 1,
                1 => report.boundary_faces += 1,
                _ => report.orphan_faces.push(fid),
            }
            if face.n_cells() == 1 && face.boundary_type.is_none() {
                report.unmarked_boundary_faces.push(fid);
            }
            if face.edges.len() < 3 {
                report.short_faces.push(fid);
            } else if grid.face_vertices(fid).is_err() {
                report.open_faces.push(fid);
            }
            for cid in [face.left, face.right].into_iter().flatten() {
                let listed = grid.cell(cid).is_ok_and(|c| c.faces.contains(&fid));
                if !listed {
                    report.broken_links.push((fid, cid));
                }
            }
        }

        for (cid, cell) in grid.cells() {
            if cell.faces.len() < 3 {
                report.thin_cells.push(cid);
            }
            for &fid in &cell.faces {
                let linked = grid
                    .face(fid)
                    .is_ok_and(|f| f.left == Some(cid) || f.right == Some(cid));
                if !linked {
                    report.broken_links.push((fid, cid));
                }
            }
        }

        debug!(
            interior = report.interior_faces,
            boundary = report.boundary_faces,
            consistent = report.is_consistent(),
            "checked grid"
        );
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grid3d::{SerializedGrid, Side};
    use crate::math::Point3;
    use crate::operations::creation::MakeCuboid;

    #[test]
    fn cuboid_is_consistent() {
        let grid = MakeCuboid::new(Point3::origin(), [1.0, 1.0, 1.0], [2, 2, 2])
            .execute()
            .unwrap();
        let report = CheckGrid::new().execute(&grid);
        assert!(report.is_consistent());
        assert_eq!(report.interior_faces, 12);
        assert_eq!(report.boundary_faces, 24);
        assert!(report.unmarked_boundary_faces.is_empty());
        assert!(report.thin_cells.is_empty());
    }

    #[test]
    fn detects_defects() {
        let mut s = SerializedGrid::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ] {
            s.add_point(p);
        }
        let a = s.add_edge(0, 1);
        let b = s.add_edge(1, 2);
        let c = s.add_edge(2, 0);
        let d = s.add_edge(2, 3);
        let closed = s.add_face(vec![a, b, c]);
        let open = s.add_face(vec![a, b, d]);
        let short = s.add_face(vec![a, b]);
        s.add_face(vec![c, a, b]);
        s.add_cell(&[(closed, Side::Left), (open, Side::Right), (short, Side::Left)])
            .unwrap();
        let grid = s.assemble().unwrap();

        let report = CheckGrid::new().execute(&grid);
        assert!(!report.is_consistent());
        assert_eq!(report.orphan_faces.len(), 1);
        assert_eq!(report.short_faces.len(), 1);
        assert_eq!(report.open_faces.len(), 1);
        assert_eq!(report.unmarked_boundary_faces.len(), 3);
        assert!(report.broken_links.is_empty());
        assert_eq!(report.boundary_faces, 3);
    }
}
