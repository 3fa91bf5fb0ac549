//! "Which region is X?" question selection and answer checking.

use rand::Rng;
use tracing::debug;

use crate::bookmark::{Bookmark, BookmarkCollection, SENTINEL_NAME};
use crate::error::QuizError;
use crate::selection::Selection;

/// Tracks the bookmark currently asked about.
///
/// The collection is passed to every call rather than borrowed for the
/// quiz's lifetime, so bookmarks may still be edited between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quiz {
    current: usize,
}

impl Quiz {
    /// Starts a quiz. No question is asked until [`Quiz::next_question`].
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NotEnoughBookmarks`] unless the collection holds
    /// at least two user bookmarks.
    pub fn start(collection: &BookmarkCollection) -> Result<Self, QuizError> {
        let available = collection.bookmark_count();
        if available < 2 {
            return Err(QuizError::NotEnoughBookmarks { available });
        }
        Ok(Self { current: 0 })
    }

    /// Index of the bookmark being asked about, `0` before the first
    /// question.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Picks a new bookmark uniformly among the user bookmarks, never the
    /// one asked last, and returns its index.
    ///
    /// If the collection was shrunk to a single bookmark that one is asked
    /// again; with none left the quiz falls back to the sentinel.
    pub fn next_question(&mut self, collection: &BookmarkCollection, rng: &mut impl Rng) -> usize {
        let count = collection.bookmark_count();
        self.current = match count {
            0 => 0,
            1 => 1,
            _ if (1..=count).contains(&self.current) => {
                // Draw among the other `count - 1` entries and skip over the
                // previous one.
                let drawn = rng.gen_range(1..count);
                if drawn >= self.current {
                    drawn + 1
                } else {
                    drawn
                }
            }
            _ => rng.gen_range(1..=count),
        };
        debug!(index = self.current, "quiz question");
        self.current
    }

    /// Prompt for the current question, e.g. `What is left ear?`.
    #[must_use]
    pub fn question(&self, collection: &BookmarkCollection) -> String {
        let name = collection
            .get(self.current)
            .map_or(SENTINEL_NAME, Bookmark::name);
        format!("What is {}?", name.to_lowercase())
    }

    /// `true` if any probed polygon belongs to the asked bookmark.
    #[must_use]
    pub fn check(&self, collection: &BookmarkCollection, hits: &Selection) -> bool {
        collection
            .get(self.current)
            .is_some_and(|bookmark| bookmark.selection().intersects(hits))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn collection(count: usize) -> BookmarkCollection {
        let mut c = BookmarkCollection::new();
        for i in 0..count {
            let faces: Selection = [i * 10, i * 10 + 1].into_iter().collect();
            c.add(Bookmark::new(format!("Region {i}"), "", faces));
        }
        c
    }

    #[test]
    fn needs_two_bookmarks() {
        let err = Quiz::start(&collection(1)).unwrap_err();
        assert!(matches!(err, QuizError::NotEnoughBookmarks { available: 1 }));
        assert!(Quiz::start(&collection(0)).is_err());
        assert!(Quiz::start(&collection(2)).is_ok());
    }

    #[test]
    fn never_asks_the_sentinel_or_repeats() {
        let c = collection(3);
        let mut quiz = Quiz::start(&c).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        let mut previous = quiz.current();
        for _ in 0..200 {
            let index = quiz.next_question(&c, &mut rng);
            assert!((1..4).contains(&index));
            assert_ne!(index, previous);
            seen[index] = true;
            previous = index;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn two_bookmarks_alternate() {
        let c = collection(2);
        let mut quiz = Quiz::start(&c).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let first = quiz.next_question(&c, &mut rng);
        let second = quiz.next_question(&c, &mut rng);
        let third = quiz.next_question(&c, &mut rng);
        assert_eq!(first + second, 3);
        assert_eq!(third, first);
    }

    #[test]
    fn same_seed_same_questions() {
        let c = collection(5);
        let run = |seed| {
            let mut quiz = Quiz::start(&c).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10).map(|_| quiz.next_question(&c, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn question_lowercases_the_name() {
        let mut c = BookmarkCollection::new();
        c.add(Bookmark::new("Left Ear", "", Selection::new()));
        c.add(Bookmark::new("NOSE", "", Selection::new()));
        let mut quiz = Quiz::start(&c).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let index = quiz.next_question(&c, &mut rng);
        let expected = if index == 1 { "What is left ear?" } else { "What is nose?" };
        assert_eq!(quiz.question(&c), expected);
    }

    #[test]
    fn check_needs_an_overlapping_hit() {
        let c = collection(3);
        let mut quiz = Quiz::start(&c).unwrap();
        let index = quiz.next_question(&c, &mut StdRng::seed_from_u64(9));
        let base = (index - 1) * 10;
        assert!(quiz.check(&c, &[base + 1].into_iter().collect()));
        assert!(!quiz.check(&c, &[base + 5].into_iter().collect()));
        assert!(!quiz.check(&c, &Selection::new()));
    }

    #[test]
    fn shrunk_collection_does_not_stall() {
        let mut c = collection(2);
        let mut quiz = Quiz::start(&c).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        quiz.next_question(&c, &mut rng);
        c.delete_at(2);
        assert_eq!(quiz.next_question(&c, &mut rng), 1);
        c.delete_at(1);
        assert_eq!(quiz.next_question(&c, &mut rng), 0);
        assert!(!quiz.check(&c, &[0].into_iter().collect()));
    }
}
