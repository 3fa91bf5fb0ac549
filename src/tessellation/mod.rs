//! Splitting mesh polygons into triangles.
//!
//! Picking works triangle by triangle, so every polygon, convex or not, is
//! first broken into triangles that keep the polygon's winding.

mod triangulate;

pub use triangulate::triangulate_loop;
