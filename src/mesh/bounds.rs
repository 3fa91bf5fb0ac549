use crate::math::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// A box containing exactly one point.
    #[must_use]
    pub fn at(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// The bounding box of a set of points, or `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut aabb = Self::at(*iter.next()?);
        for p in iter {
            aabb.extend(p);
        }
        Some(aabb)
    }

    /// Grows the box to contain `point`.
    pub fn extend(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Side lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// The box center, computed as `max - size / 2` per axis.
    #[must_use]
    pub fn center(&self) -> Point3 {
        self.max - self.size() / 2.0
    }

    /// The longest side.
    #[must_use]
    pub fn largest_dimension(&self) -> f64 {
        self.size().max()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_tracks_extremes() {
        let pts = [
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 4.0, 0.5),
            Point3::new(0.0, 0.0, -3.0),
        ];
        let aabb = Aabb::from_points(&pts).unwrap();
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 4.0, 3.0));
        assert_relative_eq!(aabb.largest_dimension(), 6.0);
        assert_eq!(aabb.center(), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn empty_input_has_no_box() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
