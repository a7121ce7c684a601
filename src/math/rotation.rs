use super::{Matrix3, Point2, Point3, Vector3};

/// Builds a 3x3 rotation matrix around a unit axis by an angle (Rodrigues).
///
/// * `angle` - Rotation angle in radians.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn axis_angle_matrix(axis: &Vector3, angle: f64) -> Matrix3 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix3::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,
    )
}

/// Rotates a point of the `z = 0` plane around an in-plane axis passing
/// through `anchor`, using a matrix from [`axis_angle_matrix`].
#[must_use]
pub fn rotate_planar_point(point: &Point2, anchor: &Point2, rotation: &Matrix3) -> Point3 {
    let local = Vector3::new(point.x - anchor.x, point.y - anchor.y, 0.0);
    let rotated = rotation * local;
    Point3::new(rotated.x + anchor.x, rotated.y + anchor.y, rotated.z)
}
