use tracing::{trace, warn};

use super::backend::{PickBackend, PickPass};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Matrix4, Point2, Vector4};
use crate::mesh::Mesh;
use crate::selection::Selection;
use crate::tessellation::triangulate_loop;

/// Clip-space half-spaces as `(axis, sign)`: inside when `w + sign * v[axis] >= 0`.
const FRUSTUM_PLANES: [(usize, f64); 6] = [
    (0, 1.0),
    (0, -1.0),
    (1, 1.0),
    (1, -1.0),
    (2, 1.0),
    (2, -1.0),
];

/// CPU pick backend.
///
/// Emulates a selection-mode render: every polygon is split into
/// triangles, each triangle is clipped against the pick volume, and a
/// polygon is a hit when any front-facing piece with non-zero area
/// survives. Depth is ignored, so overlapping polygons are all reported.
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    pass: Option<ActivePass>,
    hits: Selection,
}

#[derive(Debug, Clone, Copy)]
struct ActivePass {
    clip_from_world: Matrix4,
    cull_back_faces: bool,
}

impl SoftwareBackend {
    /// Creates a new `SoftwareBackend`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PickBackend for SoftwareBackend {
    fn begin_pick(&mut self, pass: &PickPass) {
        self.hits.clear();
        self.pass = Some(ActivePass {
            clip_from_world: pass.clip_from_world(),
            cull_back_faces: pass.cull_back_faces,
        });
    }

    fn render_tagged(&mut self, mesh: &Mesh) {
        let Some(pass) = self.pass else {
            warn!("render_tagged called outside a pick");
            return;
        };
        for index in 0..mesh.polygon_count() {
            let points = mesh.polygon_points(index);
            let clip: Vec<Vector4> = points
                .iter()
                .map(|p| pass.clip_from_world * p.to_homogeneous())
                .collect();
            let hit = triangulate_loop(&points).into_iter().any(|[a, b, c]| {
                visible_in_volume(vec![clip[a], clip[b], clip[c]], pass.cull_back_faces)
            });
            if hit {
                self.hits.insert(index);
            } else {
                trace!(polygon = index, "polygon outside pick volume or culled");
            }
        }
    }

    fn end_pick(&mut self) -> Selection {
        self.pass = None;
        std::mem::take(&mut self.hits)
    }
}

/// Returns `true` if part of the clip-space triangle lies inside the volume
/// with non-zero area and, when culling, winds counter-clockwise on screen.
fn visible_in_volume(triangle: Vec<Vector4>, cull_back_faces: bool) -> bool {
    let clipped = clip_to_volume(triangle);
    if clipped.len() < 3 {
        return false;
    }
    let ndc: Vec<Point2> = clipped
        .iter()
        .map(|v| Point2::new(v.x / v.w, v.y / v.w))
        .collect();
    let area = signed_area_2d(&ndc);
    if cull_back_faces {
        area > 0.0
    } else {
        area.abs() > 0.0
    }
}

/// Sutherland-Hodgman clipping against the six clip-space planes.
///
/// Everything that survives the near plane has `w > 0`.
fn clip_to_volume(mut polygon: Vec<Vector4>) -> Vec<Vector4> {
    for &(axis, sign) in &FRUSTUM_PLANES {
        if polygon.is_empty() {
            break;
        }
        let distance = |v: &Vector4| v.w + sign * v[axis];
        let mut out = Vec::with_capacity(polygon.len() + 1);
        for (i, current) in polygon.iter().enumerate() {
            let next = &polygon[(i + 1) % polygon.len()];
            let (dc, dn) = (distance(current), distance(next));
            if dc >= 0.0 {
                out.push(*current);
            }
            if (dc >= 0.0) != (dn >= 0.0) {
                let t = dc / (dc - dn);
                out.push(current + (next - current) * t);
            }
        }
        polygon = out;
    }
    polygon
}
