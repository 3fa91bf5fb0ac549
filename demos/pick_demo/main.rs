//! Headless picking walkthrough.
//!
//! Loads a PLY mesh, brushes the polygons under the center of a 640x480
//! view, stores them as a bookmark, then reloads the bookmark file against
//! the same mesh.
//!
//! Usage:
//! ```text
//! cargo run --example pick_demo -- model.ply [bookmarks.xml]
//! RUST_LOG=meshmark=debug cargo run --example pick_demo -- model.ply
//! ```

use std::env;
use std::path::PathBuf;

use meshmark::bookmark::{Bookmark, BookmarkCollection};
use meshmark::import::{MeshImporter, PlyImporter};
use meshmark::picking::{Camera, PickEngine, SoftwareBackend, ViewportSize};
use meshmark::selection::Selection;
use meshmark::MeshmarkError;

fn main() -> Result<(), MeshmarkError> {
    // Default: WARN for everything, INFO for meshmark.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("pick_demo=info".parse().unwrap_or_default())
        .add_directive("meshmark=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = env::args_os().skip(1);
    let Some(mesh_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: pick_demo <mesh.ply> [bookmarks.xml]");
        return Ok(());
    };
    let bookmark_path = args
        .next()
        .map_or_else(|| mesh_path.with_extension("xml"), PathBuf::from);

    let mesh = PlyImporter::new().import(&mesh_path)?;
    let camera = Camera::framing(mesh.extent());
    let view = ViewportSize::new(640, 480);

    let mut engine = PickEngine::new(SoftwareBackend::new());
    let mut selection = Selection::new();
    let hits = engine.brush(&mut selection, 320.0, 240.0, &camera, view, &mesh);
    tracing::info!(hits = hits.len(), faces = %selection, "brushed view center");

    let mut bookmarks = BookmarkCollection::new();
    bookmarks.add(Bookmark::new("Center", "Polygons under the view center", selection));
    bookmarks.save(&bookmark_path)?;

    let report = bookmarks.open(&bookmark_path, mesh.max_polygon_index())?;
    for bookmark in bookmarks.bookmarks() {
        println!("{}: {} faces", bookmark.name(), bookmark.selection().len());
    }
    if report.has_errors() {
        println!("{} stale face indices dropped", report.errors);
    }
    Ok(())
}
