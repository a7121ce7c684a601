use tracing::info;

use crate::error::{OperationError, Result, TopologyError, VolgridError};
use crate::grid3d::{Grid3D, SerializedGrid, Side};
use crate::math::{Point3, TOLERANCE};

/// Creates a structured hexahedral grid filling an axis-aligned box.
///
/// Boundary faces are marked 1 and 2 on the low and high x sides, 3 and 4
/// on the y sides and 5 and 6 on the z sides.
pub struct MakeCuboid {
    origin: Point3,
    lengths: [f64; 3],
    counts: [usize; 3],
}

/// Per-node slots of one family of axis-aligned primitives.
type NodeSlots = Vec<Option<usize>>;

impl MakeCuboid {
    /// Creates a new `MakeCuboid` operation for the box starting at
    /// `origin` with side `lengths`, split into `counts` cells per axis.
    #[must_use]
    pub fn new(origin: Point3, lengths: [f64; 3], counts: [usize; 3]) -> Self {
        Self {
            origin,
            lengths,
            counts,
        }
    }

    /// Executes the operation and returns the assembled grid.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a length is not positive
    /// or a cell count is zero.
    #[allow(clippy::many_single_char_names)]
    pub fn execute(&self) -> Result<Grid3D> {
        if self.lengths.iter().any(|l| !l.is_finite() || *l <= TOLERANCE) {
            return Err(OperationError::InvalidInput("box lengths must be positive".into()).into());
        }
        if self.counts.contains(&0) {
            return Err(OperationError::InvalidInput("cell counts must be non-zero".into()).into());
        }
        let [nx, ny, nz] = self.counts;
        let (sx, sy, sz) = (1, nx + 1, (nx + 1) * (ny + 1));
        let n_nodes = sz * (nz + 1);
        let mut out = SerializedGrid::new();

        #[allow(clippy::cast_precision_loss)]
        let coords = |axis: usize| -> Vec<f64> {
            let n = self.counts[axis];
            let h = self.lengths[axis] / n as f64;
            (0..=n).map(|i| self.origin[axis] + i as f64 * h).collect()
        };
        let (x, y, z) = (coords(0), coords(1), coords(2));
        for &zk in &z {
            for &yj in &y {
                for &xi in &x {
                    out.add_point(Point3::new(xi, yj, zk));
                }
            }
        }

        let nodes = move || {
            (0..=nz).flat_map(move |k| {
                (0..=ny).flat_map(move |j| (0..=nx).map(move |i| (i, j, k)))
            })
        };
        let gi = |i: usize, j: usize, k: usize| i * sx + j * sy + k * sz;

        // edges along x, y, z
        let mut edges: [NodeSlots; 3] = std::array::from_fn(|_| vec![None; n_nodes]);
        let strides = [sx, sy, sz];
        for (axis, slots) in edges.iter_mut().enumerate() {
            for (i, j, k) in nodes() {
                if [i < nx, j < ny, k < nz][axis] {
                    let g = gi(i, j, k);
                    slots[g] = Some(out.add_edge(g, g + strides[axis]));
                }
            }
        }
        let edge = |axis: usize, g: usize| -> Result<usize> {
            edges[axis][g].ok_or_else(|| missing("edge", axis, g))
        };

        // faces normal to x, y, z
        let mut faces: [NodeSlots; 3] = std::array::from_fn(|_| vec![None; n_nodes]);
        for (axis, slots) in faces.iter_mut().enumerate() {
            for (i, j, k) in nodes() {
                let g = gi(i, j, k);
                let loop_edges = match axis {
                    0 if j < ny && k < nz => {
                        vec![edge(2, g)?, edge(1, g + sz)?, edge(2, g + sy)?, edge(1, g)?]
                    }
                    1 if i < nx && k < nz => {
                        vec![edge(0, g)?, edge(2, g + sx)?, edge(0, g + sz)?, edge(2, g)?]
                    }
                    2 if i < nx && j < ny => {
                        vec![edge(1, g)?, edge(0, g + sy)?, edge(1, g + sx)?, edge(0, g)?]
                    }
                    _ => continue,
                };
                slots[g] = Some(out.add_face(loop_edges));
            }
        }
        let face = |axis: usize, g: usize| -> Result<usize> {
            faces[axis][g].ok_or_else(|| missing("face", axis, g))
        };

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let g = gi(i, j, k);
                    out.add_cell(&[
                        (face(0, g)?, Side::Left),
                        (face(0, g + sx)?, Side::Right),
                        (face(1, g)?, Side::Left),
                        (face(1, g + sy)?, Side::Right),
                        (face(2, g)?, Side::Left),
                        (face(2, g + sz)?, Side::Right),
                    ])?;
                }
            }
        }

        for (axis, slots) in faces.iter().enumerate() {
            let (low, high) = BOUNDARY_MARKERS[axis];
            for &f in slots.iter().flatten() {
                let record = &out.faces[f];
                let marker = match (record.left, record.right) {
                    (Some(_), None) => low,
                    (None, Some(_)) => high,
                    _ => continue,
                };
                out.set_boundary_type(f, marker)?;
            }
        }

        let result = out.assemble()?;
        info!(
            nx,
            ny,
            nz,
            vertices = result.n_vertices(),
            faces = result.n_faces(),
            cells = result.n_cells(),
            "built cuboid grid"
        );
        Ok(result)
    }
}

/// Low/high side markers per axis.
const BOUNDARY_MARKERS: [(i32, i32); 3] = [(1, 2), (3, 4), (5, 6)];

fn missing(what: &str, axis: usize, node: usize) -> VolgridError {
    TopologyError::EntityNotFound(format!("{what} along axis {axis} at node {node}"))
        .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn unit_cube() {
        let grid = MakeCuboid::new(Point3::origin(), [1.0, 1.0, 1.0], [1, 1, 1])
            .execute()
            .unwrap();
        assert_eq!(grid.n_vertices(), 8);
        assert_eq!(grid.n_edges(), 12);
        assert_eq!(grid.n_faces(), 6);
        assert_eq!(grid.n_cells(), 1);
        let mut markers: Vec<i32> = grid.faces().filter_map(|(_, f)| f.boundary_type).collect();
        markers.sort_unstable();
        assert_eq!(markers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn structured_counts() {
        let grid = MakeCuboid::new(Point3::new(1.0, 2.0, 3.0), [2.0, 3.0, 4.0], [2, 3, 4])
            .execute()
            .unwrap();
        assert_eq!(grid.n_vertices(), 3 * 4 * 5);
        assert_eq!(grid.n_edges(), 2 * 4 * 5 + 3 * 3 * 5 + 4 * 3 * 4);
        assert_eq!(grid.n_faces(), 3 * 3 * 4 + 2 * 4 * 4 + 2 * 3 * 5);
        assert_eq!(grid.n_cells(), 24);
        let boundary = grid.faces().filter(|(_, f)| f.is_boundary()).count();
        assert_eq!(boundary, 2 * (3 * 4 + 2 * 4 + 2 * 3));
        let last = grid.vertices().last().unwrap().1.point;
        assert_relative_eq!(last, Point3::new(3.0, 5.0, 7.0));
    }

    #[test]
    fn low_x_faces_hold_cells_on_left() {
        let grid = MakeCuboid::new(Point3::origin(), [1.0, 1.0, 1.0], [2, 1, 1])
            .execute()
            .unwrap();
        for (id, f) in grid.faces().filter(|(_, f)| f.boundary_type == Some(1)) {
            assert!(f.left.is_some() && f.right.is_none());
            let pts: Vec<_> = grid
                .face_vertices(id)
                .unwrap()
                .into_iter()
                .map(|v| grid.vertex(v).unwrap().point)
                .collect();
            assert!(pts.iter().all(|p| p.x.abs() < 1e-12));
        }
    }

    #[test]
    fn rejects_degenerate_box() {
        assert!(MakeCuboid::new(Point3::origin(), [0.0, 1.0, 1.0], [1, 1, 1])
            .execute()
            .is_err());
        assert!(MakeCuboid::new(Point3::origin(), [1.0, 1.0, 1.0], [1, 0, 1])
            .execute()
            .is_err());
    }
}
