use crate::math::Matrix4;
use crate::mesh::Mesh;
use crate::selection::Selection;

/// Transforms in effect for one pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickPass {
    /// Camera projection already narrowed to the pick window.
    pub projection: Matrix4,
    /// World-to-eye transform of the camera.
    pub model_view: Matrix4,
    /// Skip polygons that face away from the camera.
    pub cull_back_faces: bool,
}

impl PickPass {
    /// Combined world-to-clip transform.
    #[must_use]
    pub fn clip_from_world(&self) -> Matrix4 {
        self.projection * self.model_view
    }
}

/// A renderer that can report which tagged polygons reach the visible volume.
///
/// A pick is always `begin_pick`, then `render_tagged`, then `end_pick`.
/// Implementations own whatever transient render state the pick needs and
/// must restore it in `end_pick`.
pub trait PickBackend {
    /// Narrows rendering to the pick volume and starts recording hits.
    fn begin_pick(&mut self, pass: &PickPass);

    /// Renders every polygon of `mesh`, tagged with its index.
    fn render_tagged(&mut self, mesh: &Mesh);

    /// Stops recording and returns every tag that produced a hit.
    fn end_pick(&mut self) -> Selection;
}
