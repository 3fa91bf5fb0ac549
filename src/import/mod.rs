//! Mesh importers.
//!
//! An importer turns a file into a fully populated [`Mesh`]. Nothing is
//! installed unless the whole file parses.

mod ply;

pub use ply::PlyImporter;

use std::path::Path;

use crate::error::ImportError;
use crate::mesh::Mesh;

/// Reads a mesh file into a [`Mesh`].
pub trait MeshImporter {
    /// Parses the file at `path` into a new, centered mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    fn import(&self, path: &Path) -> Result<Mesh, ImportError>;

    /// Imports `path` and swaps it into `mesh`.
    ///
    /// On error `mesh` keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    fn import_into(&self, mesh: &mut Mesh, path: &Path) -> Result<(), ImportError> {
        *mesh = self.import(path)?;
        Ok(())
    }
}
