use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::xml::{self, RawEntry};
use super::Bookmark;
use crate::error::BookmarkError;
use crate::selection::Selection;

/// Outcome of [`BookmarkCollection::open`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Bookmarks read from the file, the sentinel excluded.
    pub loaded: usize,
    /// Face tokens that were dropped: not a number, or past the mesh's last
    /// polygon.
    pub errors: usize,
}

impl LoadReport {
    /// `true` if any face index had to be dropped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Ordered list of bookmarks with a fixed "None" entry at index 0.
///
/// The sentinel can never be deleted or updated and is never written to disk.
/// Names need not be unique.
#[derive(Debug, Clone)]
pub struct BookmarkCollection {
    entries: Vec<Bookmark>,
    dirty: bool,
}

impl Default for BookmarkCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkCollection {
    /// Creates a collection holding only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Bookmark::sentinel()],
            dirty: false,
        }
    }

    /// Drops every user bookmark and resets the dirty flag.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(Bookmark::sentinel());
        self.dirty = false;
    }

    /// Appends a bookmark and returns its index.
    pub fn add(&mut self, bookmark: Bookmark) -> usize {
        debug!(name = bookmark.name(), faces = bookmark.selection().len(), "bookmark added");
        self.entries.push(bookmark);
        self.dirty = true;
        self.entries.len() - 1
    }

    /// Removes and returns the bookmark at `index`.
    ///
    /// Returns `None` for the sentinel or an index past the end.
    pub fn delete_at(&mut self, index: usize) -> Option<Bookmark> {
        if index == 0 || index >= self.entries.len() {
            debug!(index, size = self.entries.len(), "ignored bookmark delete");
            return None;
        }
        self.dirty = true;
        Some(self.entries.remove(index))
    }

    /// Replaces the fields of the bookmark at `index`.
    ///
    /// Returns `false` without touching anything for the sentinel or an
    /// index past the end.
    pub fn update_at(
        &mut self,
        index: usize,
        name: impl Into<String>,
        comment: impl Into<String>,
        selection: Selection,
    ) -> bool {
        if index == 0 {
            return false;
        }
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.set_name(name);
        entry.set_comment(comment);
        entry.set_selection(selection);
        self.dirty = true;
        true
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.entries.get(index)
    }

    /// Number of entries, the sentinel included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Number of user bookmarks.
    #[must_use]
    pub fn bookmark_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// All entries in order, the sentinel first.
    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.entries.iter()
    }

    /// User bookmarks only.
    #[must_use]
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.entries[1..]
    }

    /// `true` after an add, update or delete since the last clear or open.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes every user bookmark to `path`, replacing the file.
    ///
    /// The dirty flag is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BookmarkError> {
        let path = path.as_ref();
        let bytes = xml::write_document(self.bookmarks())?;
        fs::write(path, bytes).map_err(|source| BookmarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), count = self.bookmark_count(), "bookmarks saved");
        Ok(())
    }

    /// Replaces the collection with the bookmarks stored at `path`.
    ///
    /// The collection is cleared before reading, so on error it holds only
    /// the sentinel. Face indices greater than `max_index` (all of them when
    /// `max_index` is `None`, i.e. no mesh is loaded) and tokens that are not
    /// numbers are dropped and counted in [`LoadReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkError::Io`] if the file cannot be read, or
    /// [`BookmarkError::Xml`] / [`BookmarkError::MissingRoot`] if it is not a
    /// bookmark document.
    pub fn open(
        &mut self,
        path: impl AsRef<Path>,
        max_index: Option<usize>,
    ) -> Result<LoadReport, BookmarkError> {
        let path = path.as_ref();
        self.clear();

        let text = fs::read_to_string(path).map_err(|source| BookmarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = xml::read_document(&text)?;

        let mut report = LoadReport::default();
        for RawEntry {
            name,
            comments,
            faces,
        } in raw
        {
            let selection = parse_faces(&faces, max_index, &mut report.errors);
            self.entries.push(Bookmark::new(name, comments, selection));
            report.loaded += 1;
        }

        if report.has_errors() {
            warn!(
                path = %path.display(),
                dropped = report.errors,
                "bookmark file references faces the current mesh does not have"
            );
        }
        info!(path = %path.display(), count = report.loaded, "bookmarks loaded");
        Ok(report)
    }
}

impl<'a> IntoIterator for &'a BookmarkCollection {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_faces(text: &str, max_index: Option<usize>, errors: &mut usize) -> Selection {
    let mut selection = Selection::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<usize>() {
            Ok(index) if max_index.is_some_and(|max| index <= max) => {
                selection.insert(index);
            }
            _ => *errors += 1,
        }
    }
    selection
}
