use std::collections::HashMap;

use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::math::polygon_2d::{contains_point_2d, is_convex_2d};
use crate::math::polygon_3d::{newell_normal, project_to_plane};
use crate::math::{Point2, Point3};

/// Triangulates a closed loop of 3D points.
///
/// Returns triangles as indices into `points`, wound the same way as the
/// loop. Convex loops are fanned from their first vertex. Concave loops are
/// projected onto their Newell plane and triangulated with a constrained
/// Delaunay triangulation; a loop whose edges cross itself falls back to a
/// fan.
#[must_use]
pub fn triangulate_loop(points: &[Point3]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[0, 1, 2]];
    }

    let normal = newell_normal(points);
    let Some(flat) = project_to_plane(points, &normal) else {
        return fan(n);
    };
    if is_convex_2d(&flat) {
        return fan(n);
    }

    match constrained_triangulation(&flat) {
        Some(triangles) if !triangles.is_empty() => triangles,
        _ => {
            tracing::trace!(vertices = n, "self-intersecting loop, using fan");
            fan(n)
        }
    }
}

/// Fan triangulation `(0, i, i + 1)`.
fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

/// CDT of a 2D loop, keeping the triangles whose centroid lies inside it.
///
/// Returns `None` if a point cannot be inserted or two loop edges cross.
fn constrained_triangulation(flat: &[Point2]) -> Option<Vec<[usize; 3]>> {
    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    let mut handles = Vec::with_capacity(flat.len());
    let mut loop_index: HashMap<usize, usize> = HashMap::new();

    for (i, p) in flat.iter().enumerate() {
        let handle = cdt.insert(SpadePoint2::new(p.x, p.y)).ok()?;
        loop_index.entry(handle.index()).or_insert(i);
        handles.push(handle);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return None;
        }
        cdt.add_constraint(from, to);
    }

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        let corners = face.vertices().map(|v| loop_index.get(&v.fix().index()).copied());
        let [Some(a), Some(b), Some(c)] = corners else {
            return None;
        };
        let centroid = Point2::from((flat[a].coords + flat[b].coords + flat[c].coords) / 3.0);
        if contains_point_2d(flat, &centroid) {
            triangles.push([a, b, c]);
        }
    }
    Some(triangles)
}
