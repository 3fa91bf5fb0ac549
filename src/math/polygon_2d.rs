use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the closed polygon turns the same way at every corner.
///
/// Collinear corners are ignored, so a triangle with a midpoint inserted on
/// one edge still counts as convex. Polygons with fewer than three points are
/// never convex.
#[must_use]
pub fn is_convex_2d(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut positive: Option<bool> = None;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let turn = cross_2d(b - a, c - b);
        if turn.abs() <= TOLERANCE {
            continue;
        }
        match positive {
            None => positive = Some(turn > 0.0),
            Some(p) if p != (turn > 0.0) => return false,
            Some(_) => {}
        }
    }
    // Winding must also close exactly once; a star polygon turns one way
    // everywhere but wraps around twice.
    let mut total = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let (d0, d1) = (b - a, c - b);
        total += cross_2d(d0, d1).atan2(d0.dot(&d1));
    }
    (total.abs() - std::f64::consts::TAU).abs() < 1e-6
}

/// Even-odd containment test for a closed polygon.
///
/// Points exactly on an edge may land on either side.
#[must_use]
pub fn contains_point_2d(points: &[Point2], point: &Point2) -> bool {
    let n = points.len();
    let mut inside = false;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// 2D cross product of two vectors.
#[inline]
fn cross_2d(a: nalgebra::Vector2<f64>, b: nalgebra::Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn signed_area_ccw_square() {
        let pts = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!((signed_area_2d(&pts) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let pts = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[p(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn square_is_convex_either_winding() {
        let ccw = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(is_convex_2d(&ccw));
        assert!(is_convex_2d(&cw));
    }

    #[test]
    fn l_shape_is_concave() {
        let pts = [
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        assert!(!is_convex_2d(&pts));
    }

    #[test]
    fn collinear_corner_is_ignored() {
        let pts = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(1.0, 1.0)];
        assert!(is_convex_2d(&pts));
    }

    #[test]
    fn l_shape_contains_only_its_arms() {
        let pts = [
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        assert!(contains_point_2d(&pts, &p(0.5, 1.5)));
        assert!(contains_point_2d(&pts, &p(1.5, 0.5)));
        assert!(!contains_point_2d(&pts, &p(1.5, 1.5)));
        assert!(!contains_point_2d(&pts, &p(-1.0, 0.5)));
        assert!(!contains_point_2d(&[], &p(0.0, 0.0)));
    }

    #[test]
    fn pentagram_is_not_convex() {
        let star: Vec<_> = (0..5)
            .map(|i| {
                let a = f64::from(i * 2) * std::f64::consts::TAU / 5.0;
                p(a.cos(), a.sin())
            })
            .collect();
        assert!(!is_convex_2d(&star));
    }
}
