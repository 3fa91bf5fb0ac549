use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::Copied;

/// A set of unique polygon indices.
///
/// Iteration is ascending, which is also the order indices are written to
/// bookmark files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an index. Returns `true` if it was not already selected.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Removes an index. Returns `true` if it was selected.
    pub fn remove(&mut self, index: usize) -> bool {
        self.indices.remove(&index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Ascending iterator over the selected indices.
    pub fn iter(&self) -> Copied<btree_set::Iter<'_, usize>> {
        self.indices.iter().copied()
    }

    /// Adds every index of `other`.
    pub fn union_with(&mut self, other: &Selection) {
        self.indices.extend(other.iter());
    }

    /// Removes every index of `other`.
    pub fn subtract(&mut self, other: &Selection) {
        for index in other.iter() {
            self.indices.remove(&index);
        }
    }

    /// Returns `true` if the two selections share at least one index.
    #[must_use]
    pub fn intersects(&self, other: &Selection) -> bool {
        !self.indices.is_disjoint(&other.indices)
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for Selection {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.indices.extend(iter);
    }
}

impl IntoIterator for Selection {
    type Item = usize;
    type IntoIter = btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = usize;
    type IntoIter = Copied<btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Comma-joined ascending list, no trailing comma: `2,5,11`.
impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}
