use crate::selection::Selection;

/// Display name of the "nothing selected" entry at index 0.
pub const SENTINEL_NAME: &str = "None";

/// A named, commented set of polygon indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmark {
    name: String,
    comment: String,
    selection: Selection,
}

impl Bookmark {
    #[must_use]
    pub fn new(name: impl Into<String>, comment: impl Into<String>, selection: Selection) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            selection,
        }
    }

    /// The "None" entry: empty comment, empty selection.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_NAME, "", Selection::new())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }
}
