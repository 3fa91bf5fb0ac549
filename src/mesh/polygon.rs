use crate::error::MeshError;

/// An ordered loop of vertex indices.
///
/// Triangles, quads and larger n-gons are all valid. Whether the indices are
/// in range is checked when the polygon is installed into a
/// [`Mesh`](super::Mesh).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    indices: Vec<usize>,
}

impl Polygon {
    /// Creates a polygon from its vertex indices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegeneratePolygon`] if fewer than three indices are
    /// given. The reported polygon number is 0; [`Mesh::set_model`](super::Mesh::set_model)
    /// reports the real position.
    pub fn new(indices: Vec<usize>) -> Result<Self, MeshError> {
        if indices.len() < 3 {
            return Err(MeshError::DegeneratePolygon {
                polygon: 0,
                len: indices.len(),
            });
        }
        Ok(Self { indices })
    }

    /// Creates a triangle.
    #[must_use]
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self {
            indices: vec![a, b, c],
        }
    }

    /// The vertex indices, in winding order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of vertices in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false`: a polygon has at least three vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The first three indices, which define the face normal.
    #[must_use]
    pub fn leading_triangle(&self) -> [usize; 3] {
        [self.indices[0], self.indices[1], self.indices[2]]
    }
}
