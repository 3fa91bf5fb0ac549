use super::{Point2, Point3, Vector3, TOLERANCE};

/// Newell normal of a closed 3D loop.
///
/// Robust for non-planar and concave loops. The length equals twice the
/// projected area, so a zero vector means the loop is degenerate.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Projects a 3D loop onto the plane perpendicular to `normal`.
///
/// The `(u, v)` basis is right-handed around `normal`, so a loop that winds
/// counter-clockwise about its normal stays counter-clockwise in 2D.
/// Returns `None` when `normal` is (near) zero.
#[must_use]
pub fn project_to_plane(points: &[Point3], normal: &Vector3) -> Option<Vec<Point2>> {
    let n = normal.try_normalize(TOLERANCE)?;
    let helper = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = helper.cross(&n).normalize();
    let v = n.cross(&u);
    let origin = points.first()?;
    Some(
        points
            .iter()
            .map(|p| {
                let d = p - origin;
                Point2::new(d.dot(&u), d.dot(&v))
            })
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn newell_normal_of_ccw_square_points_up() {
        let pts = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let n = newell_normal(&pts);
        assert!(n.x.abs() < TOLERANCE);
        assert!(n.y.abs() < TOLERANCE);
        assert!((n.z - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn newell_normal_of_collinear_points_is_zero() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0)];
        assert!(newell_normal(&pts).norm() < TOLERANCE);
    }

    #[test]
    fn projection_keeps_winding() {
        // Square in the XZ plane, counter-clockwise when seen from +Y.
        let pts = [
            p(0.0, 0.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(1.0, 0.0, 0.0),
        ];
        let n = newell_normal(&pts);
        let flat = project_to_plane(&pts, &n).unwrap();
        assert!((signed_area_2d(&flat) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn projection_rejects_zero_normal() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(project_to_plane(&pts, &Vector3::zeros()).is_none());
    }
}
