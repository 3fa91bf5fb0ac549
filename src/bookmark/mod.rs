//! Named selections and their XML file format.
//!
//! A [`BookmarkCollection`] always starts with a "None" entry so that index 0
//! can stand for "no bookmark" in list views. Only the entries after it are
//! saved.

mod collection;
mod entry;
mod xml;

pub use collection::{BookmarkCollection, LoadReport};
pub use entry::{Bookmark, SENTINEL_NAME};
