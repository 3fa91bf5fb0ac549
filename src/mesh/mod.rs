//! Indexed polygon mesh: the geometry every other module works against.
//!
//! Polygons are addressed purely by their position in the polygon list.
//! Those positions stay stable until the next [`Mesh::set_model`] or
//! [`Mesh::clear`], which is why bookmarks re-validate their indices whenever
//! they are loaded against a mesh.

mod bounds;
mod polygon;
mod vertex;

pub use bounds::Aabb;
pub use polygon::Polygon;
pub use vertex::Vertex;

use crate::error::MeshError;
use crate::math::{Point3, Vector3};

/// Vertices, polygons and the extent used to place the camera.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    polygons: Vec<Polygon>,
    extent: f64,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the empty mesh.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.polygons.clear();
        self.extent = 0.0;
    }

    /// Replaces the whole mesh and recomputes vertex normals.
    ///
    /// Any normals carried by `vertices` are discarded. When this returns
    /// `Ok`, every vertex normal is either unit length or zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a polygon has fewer than three vertices or
    /// references a vertex that does not exist. The mesh is left untouched.
    pub fn set_model(
        &mut self,
        mut vertices: Vec<Vertex>,
        polygons: Vec<Polygon>,
        extent: f64,
    ) -> Result<(), MeshError> {
        let vertex_count = vertices.len();
        for (polygon, poly) in polygons.iter().enumerate() {
            if poly.len() < 3 {
                return Err(MeshError::DegeneratePolygon {
                    polygon,
                    len: poly.len(),
                });
            }
            if let Some(&index) = poly.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::VertexIndexOutOfRange {
                    polygon,
                    index,
                    vertex_count,
                });
            }
        }

        for vertex in &mut vertices {
            vertex.reset_normal();
        }
        compute_normals(&mut vertices, &polygons);

        self.vertices = vertices;
        self.polygons = polygons;
        self.extent = extent;
        Ok(())
    }

    /// Returns `true` if the mesh has at least one vertex.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Largest side of the bounding box at import time.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Highest valid polygon index, or `None` for a mesh without polygons.
    #[must_use]
    pub fn max_polygon_index(&self) -> Option<usize> {
        self.polygons.len().checked_sub(1)
    }

    /// Returns the vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns the polygon at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn polygon(&self, index: usize) -> &Polygon {
        &self.polygons[index]
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Positions of the polygon's vertices, in winding order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn polygon_points(&self, index: usize) -> Vec<Point3> {
        self.polygons[index]
            .indices()
            .iter()
            .map(|&v| *self.vertices[v].position())
            .collect()
    }

    /// Bounding box of the current vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(Vertex::position))
    }
}

/// Accumulates face normals onto vertices, then normalizes them.
///
/// Only the first three vertices of each polygon define its face normal and
/// only those three receive it. For planar n-gons the normal is the same
/// anyway; the remaining vertices of larger polygons get nothing from that
/// polygon.
fn compute_normals(vertices: &mut [Vertex], polygons: &[Polygon]) {
    for poly in polygons {
        let [a, b, c] = poly.leading_triangle();
        let normal = face_normal(
            vertices[a].position(),
            vertices[b].position(),
            vertices[c].position(),
        );
        for index in [a, b, c] {
            vertices[index].add_normal(&normal);
        }
    }
    for vertex in vertices {
        vertex.normalize_normal();
    }
}

/// Unnormalized normal `(v1 - v0) x (v2 - v0)`.
fn face_normal(v0: &Point3, v1: &Point3, v2: &Point3) -> Vector3 {
    (v1 - v0).cross(&(v2 - v0))
}
