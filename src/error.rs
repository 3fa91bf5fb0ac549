use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for `meshmark`.
#[derive(Debug, Error)]
pub enum MeshmarkError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Bookmark(#[from] BookmarkError),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Violations of the geometry model invariants.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("polygon {polygon} has {len} vertices, at least 3 are required")]
    DegeneratePolygon { polygon: usize, len: usize },

    #[error("polygon {polygon} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexIndexOutOfRange {
        polygon: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Errors raised while reading a mesh file.
///
/// Every variant is fatal to the current import: no partial mesh is installed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    #[error("line {line}: expected a number, found {token:?}")]
    MalformedNumber { line: usize, token: String },

    #[error("line {line}: missing {expected}")]
    MissingToken { line: usize, expected: &'static str },

    #[error("header is not terminated by end_header")]
    MissingEndHeader,

    #[error("file ended after {found} of {expected} {region}")]
    UnexpectedEof {
        region: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors raised while reading or writing a bookmark file.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bookmark document: {0}")]
    Xml(String),

    #[error("bookmark document has no root element")]
    MissingRoot,
}

/// Errors raised by the quiz core.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("a quiz needs at least two bookmarks, {available} available")]
    NotEnoughBookmarks { available: usize },
}

/// Convenience type alias for results using [`MeshmarkError`].
pub type Result<T> = std::result::Result<T, MeshmarkError>;
