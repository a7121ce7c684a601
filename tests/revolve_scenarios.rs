#![allow(clippy::unwrap_used)]

use std::f64::consts::TAU;

use approx::assert_relative_eq;
use volgrid::error::GeometryError;
use volgrid::grid2d::Grid2D;
use volgrid::grid3d::Grid3D;
use volgrid::math::Point2;
use volgrid::operations::query::CheckGrid;
use volgrid::operations::revolve::{PoleMode, Revolve};
use volgrid::operations::sweep::Sweep;
use volgrid::VolgridError;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("volgrid=debug".parse().unwrap_or_default());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn y_axis() -> (Point2, Point2) {
    (p(0.0, 0.0), p(0.0, 1.0))
}

fn octagon(center: Point2, radius: f64) -> Grid2D {
    let pts: Vec<Point2> = (0..8_u32)
        .map(|i| {
            let t = TAU * f64::from(i) / 8.0;
            p(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect();
    Grid2D::from_polygons(&pts, &[(0..8).collect()]).unwrap()
}

fn edge_ends(grid: &Grid2D) -> Vec<(usize, usize)> {
    let indexed = grid.enumerate_all().unwrap();
    indexed.edges.iter().map(|e| (e.first, e.last)).collect()
}

fn face_sizes(grid: &Grid3D) -> Vec<usize> {
    let mut sizes: Vec<usize> = grid.faces().map(|(_, f)| f.edges.len()).collect();
    sizes.sort_unstable();
    sizes
}

fn cell_sizes(grid: &Grid3D) -> Vec<usize> {
    let mut sizes: Vec<usize> = grid.cells().map(|(_, c)| c.faces.len()).collect();
    sizes.sort_unstable();
    sizes
}

#[test]
fn complete_octagon_ring() {
    init_tracing();
    let mut grid = octagon(p(3.0, 0.0), 1.0);
    let (a, b) = y_axis();
    let result = Revolve::new(vec![0.0, 90.0, 180.0, 270.0, 360.0], a, b)
        .execute(&mut grid)
        .unwrap();

    assert_eq!(result.n_vertices(), 4 * 8);
    assert_eq!(result.n_edges(), 4 * 8 + 4 * 8);
    assert_eq!(result.n_faces(), 4 + 4 * 8);
    assert_eq!(result.n_cells(), 4);

    // 32 lateral quads and 4 octagonal planar faces
    let sizes = face_sizes(&result);
    assert_eq!(sizes.iter().filter(|&&s| s == 4).count(), 32);
    assert_eq!(sizes.iter().filter(|&&s| s == 8).count(), 4);
    assert_eq!(cell_sizes(&result), vec![10; 4]);

    // every planar surface is shared by two cells, the seam included
    let interior = result.faces().filter(|(_, f)| f.n_cells() == 2).count();
    assert_eq!(interior, 4);
    assert!(result
        .faces()
        .filter(|(_, f)| f.is_boundary())
        .all(|(_, f)| f.boundary_type == Some(0)));

    assert!(CheckGrid::new().execute(&result).is_consistent());
}

#[test]
fn seam_does_not_duplicate_vertices() {
    init_tracing();
    let mut grid = Grid2D::rectangular(&[1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let (a, b) = y_axis();
    let result = Revolve::full_turn(5, a, b).execute(&mut grid).unwrap();
    let pts: Vec<_> = result.vertices().map(|(_, v)| v.point).collect();
    assert_eq!(pts.len(), 5 * 6);
    for (i, pi) in pts.iter().enumerate() {
        for pj in &pts[i + 1..] {
            assert!((pi - pj).norm() > 1e-6);
        }
    }
    // radii are preserved by the rotation
    for v in &pts {
        let r = v.x.hypot(v.z);
        assert!((r - 1.0).abs() < 1e-9 || (r - 2.0).abs() < 1e-9);
    }
}

#[test]
fn axis_edge_square_collapsed_vs_triangulated() {
    init_tracing();
    let (a, b) = y_axis();
    let angles = vec![0.0, 45.0, 90.0];

    let mut grid = Grid2D::rectangular(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    let collapsed = Revolve::new(angles.clone(), a, b)
        .with_pole(PoleMode::Collapsed)
        .with_caps(1, 2)
        .execute(&mut grid)
        .unwrap();
    assert_eq!(collapsed.n_vertices(), 8);
    assert_eq!(collapsed.n_edges(), 12);
    assert_eq!(collapsed.n_faces(), 6);
    assert_eq!(collapsed.n_cells(), 1);
    // each mixed edge becomes one fan face instead of two triangles
    assert_eq!(face_sizes(&collapsed), vec![4; 6]);
    assert_eq!(cell_sizes(&collapsed), vec![6]);
    assert!(CheckGrid::new().execute(&collapsed).is_consistent());

    let triangulated = Revolve::new(angles, a, b)
        .with_caps(1, 2)
        .execute(&mut grid)
        .unwrap();
    assert_eq!(triangulated.n_vertices(), 8);
    assert_eq!(triangulated.n_edges(), 14);
    assert_eq!(triangulated.n_faces(), 9);
    assert_eq!(triangulated.n_cells(), 2);
    assert_eq!(face_sizes(&triangulated), vec![3, 3, 3, 3, 4, 4, 4, 4, 4]);
    assert_eq!(cell_sizes(&triangulated), vec![5, 5]);
    assert!(CheckGrid::new().execute(&triangulated).is_consistent());
}

#[test]
fn collapsed_pole_next_to_regular_cells() {
    init_tracing();
    let (a, b) = y_axis();
    let mut grid = Grid2D::rectangular(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
    let result = Revolve::new(vec![0.0, 45.0, 90.0], a, b)
        .with_pole(PoleMode::Collapsed)
        .execute(&mut grid)
        .unwrap();
    // one pole cell plus one cell per slab for the regular column
    assert_eq!(result.n_cells(), 3);
    let report = CheckGrid::new().execute(&result);
    assert!(report.is_consistent());
    // pole cell touches each regular cell through one lateral quad
    assert_eq!(report.interior_faces, 2 + 1);
}

#[test]
fn complete_collapsed_pole() {
    init_tracing();
    let (a, b) = y_axis();
    let mut grid = Grid2D::rectangular(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
    let result = Revolve::full_turn(4, a, b)
        .with_pole(PoleMode::Collapsed)
        .execute(&mut grid)
        .unwrap();
    // axis vertices are dropped: no revolving edge ends on the axis
    assert_eq!(result.n_vertices(), 4 * 4);
    assert_eq!(result.n_cells(), 1 + 4);
    let report = CheckGrid::new().execute(&result);
    assert!(report.is_consistent());
    assert!(report.unmarked_boundary_faces.is_empty());
}

#[test]
fn collapsed_pole_fan_shares_one_axis_vertex() {
    init_tracing();
    let (a, b) = y_axis();
    // two triangles touching the axis only at the origin
    let pts = [p(0.0, 0.0), p(1.0, -1.0), p(1.0, 0.0), p(1.0, 1.0)];
    let mut grid = Grid2D::from_polygons(&pts, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap();
    let n_surfaces = 4;
    let result = Revolve::full_turn(n_surfaces, a, b)
        .with_pole(PoleMode::Collapsed)
        .execute(&mut grid)
        .unwrap();
    // three mixed edges end at the origin, which is emitted once
    assert_eq!(result.n_vertices(), 3 * n_surfaces + 1);
    assert_eq!(cell_sizes(&result), vec![5; 8]);
    let at_origin = result
        .vertices()
        .filter(|(_, v)| v.point.coords.norm() < 1e-12)
        .count();
    assert_eq!(at_origin, 1);
    assert!(CheckGrid::new().execute(&result).is_consistent());
}

#[test]
fn complete_collapsed_triangle_has_two_fans() {
    init_tracing();
    let (a, b) = y_axis();
    let pts = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.5)];
    let mut grid = Grid2D::from_polygons(&pts, &[vec![0, 1, 2]]).unwrap();
    let result = Revolve::full_turn(4, a, b)
        .with_pole(PoleMode::Collapsed)
        .execute(&mut grid)
        .unwrap();
    assert_eq!(result.n_vertices(), 4);
    assert_eq!(cell_sizes(&result), vec![2]);
    let report = CheckGrid::new().execute(&result);
    assert_eq!(report.thin_cells.len(), 1);
    assert!(report.is_consistent());
}

#[test]
fn straddling_profile_is_rejected() {
    init_tracing();
    let (a, b) = y_axis();
    let mut grid = Grid2D::rectangular(&[-1.0, 0.0, 1.0], &[0.0, 1.0]).unwrap();
    let before = edge_ends(&grid);
    let err = Revolve::new(vec![0.0, 90.0], a, b)
        .execute(&mut grid)
        .unwrap_err();
    assert!(matches!(
        err,
        VolgridError::Geometry(GeometryError::ProfileStraddlesAxis { .. })
    ));
    assert_eq!(edge_ends(&grid), before);
}

#[test]
fn single_slab_matches_sweep_topology() {
    init_tracing();
    let pts = [p(1.0, 0.0), p(2.0, 0.0), p(2.5, 1.0), p(1.0, 1.0), p(1.5, 2.0)];
    let cells = [vec![0, 1, 2, 3], vec![3, 2, 4]];
    let mut grid = Grid2D::from_polygons(&pts, &cells).unwrap();
    let (a, b) = y_axis();

    let revolved = Revolve::new(vec![0.0, 90.0], a, b)
        .execute(&mut grid)
        .unwrap();
    let swept = Sweep::new(vec![0.0, 1.0]).execute(&grid).unwrap();

    assert_eq!(revolved.n_vertices(), swept.n_vertices());
    assert_eq!(revolved.n_edges(), swept.n_edges());
    assert_eq!(revolved.n_faces(), swept.n_faces());
    assert_eq!(revolved.n_cells(), swept.n_cells());
    assert_eq!(face_sizes(&revolved), face_sizes(&swept));
    assert_eq!(cell_sizes(&revolved), vec![5, 6]);
    assert_eq!(cell_sizes(&revolved), cell_sizes(&swept));

    let revolved_interior = revolved.faces().filter(|(_, f)| f.n_cells() == 2).count();
    let swept_interior = swept.faces().filter(|(_, f)| f.n_cells() == 2).count();
    assert_eq!(revolved_interior, 1);
    assert_eq!(revolved_interior, swept_interior);
}

#[test]
fn quarter_turn_coordinates() {
    init_tracing();
    let (a, b) = y_axis();
    let mut grid = Grid2D::rectangular(&[2.0, 3.0], &[0.0, 1.0]).unwrap();
    let result = Revolve::new(vec![0.0, 90.0], a, b)
        .execute(&mut grid)
        .unwrap();
    let pts: Vec<_> = result.vertices().map(|(_, v)| v.point).collect();
    // second surface lies in the x = 0 plane
    for v in &pts[4..] {
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
    }
    let rungs: Vec<f64> = result
        .edges()
        .map(|(_, e)| e.curvature)
        .filter(|&c| c > 0.0)
        .collect();
    assert_eq!(rungs.len(), 4);
    assert!(rungs
        .iter()
        .all(|&c| (c - 0.5).abs() < 1e-12 || (c - 1.0 / 3.0).abs() < 1e-12));
}
