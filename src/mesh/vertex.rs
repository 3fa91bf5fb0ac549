use crate::math::{Point3, Vector3};

/// A mesh vertex: position plus accumulated normal.
///
/// The normal is the running sum of incident face normals until the owning
/// [`Mesh`](super::Mesh) normalizes it at the end of `set_model`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    position: Point3,
    normal: Vector3,
}

impl Vertex {
    /// Creates a vertex at the given coordinates with a zero normal.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::at(Point3::new(x, y, z))
    }

    /// Creates a vertex at the given point with a zero normal.
    #[must_use]
    pub fn at(position: Point3) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
        }
    }

    /// The vertex position.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// The vertex normal. Unit length once the vertex belongs to a loaded mesh,
    /// unless no polygon contributes to it (then it is the zero vector).
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    pub(crate) fn translate(&mut self, offset: &Vector3) {
        self.position += offset;
    }

    pub(crate) fn reset_normal(&mut self) {
        self.normal = Vector3::zeros();
    }

    pub(crate) fn add_normal(&mut self, normal: &Vector3) {
        self.normal += normal;
    }

    /// Scales the accumulated normal to unit length. A zero normal stays zero.
    pub(crate) fn normalize_normal(&mut self) {
        if let Some(unit) = self.normal.try_normalize(0.0) {
            self.normal = unit;
        }
    }
}
