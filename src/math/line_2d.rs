use super::{Point2, Vector2};

/// Signed squared distance from `point` to the line through `anchor` with
/// unit direction `dir`.
///
/// The magnitude is the squared distance; the sign tells which side of the
/// line the point lies on (positive to the left of `dir`).
#[must_use]
pub fn signed_squared_distance(point: &Point2, anchor: &Point2, dir: &Vector2) -> f64 {
    let d = dir.x * (point.y - anchor.y) - dir.y * (point.x - anchor.x);
    d.signum() * d * d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn left_side_is_positive() {
        let m = signed_squared_distance(&Point2::new(-2.0, 1.0), &Point2::origin(), &Vector2::y());
        assert!((m - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn right_side_is_negative() {
        let m = signed_squared_distance(&Point2::new(3.0, 7.0), &Point2::origin(), &Vector2::y());
        assert!((m + 9.0).abs() < TOLERANCE);
    }

    #[test]
    fn anchor_offset_is_respected() {
        let anchor = Point2::new(1.0, 0.0);
        let m = signed_squared_distance(&Point2::new(1.0, 42.0), &anchor, &Vector2::y());
        assert!(m.abs() < TOLERANCE);
    }
}
