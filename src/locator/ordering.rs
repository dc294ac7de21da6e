//! Graded ordering
//!
//! [`Locator::compare`] reports both direction and distance:
//!
//! | magnitude | meaning                                                          |
//! |-----------|------------------------------------------------------------------|
//! | 0         | equal                                                            |
//! | 1         | adjacent: one verse step from the earlier to the later locator   |
//! | 2         | same book and chapter                                            |
//! | 3         | same book                                                        |
//! | 4         | different books                                                  |
//!
//! Adjacency wins over the other buckets, so the last verse of a book and the first verse of
//! the next book compare at distance 1. The sign is negative when `self` comes first in reading
//! order.

use super::navigation::{verse_after, Position};
use super::Locator;
use std::cmp::Ordering;

impl Locator {
    pub fn compare(&self, other: &Locator) -> i32 {
        let (sign, earlier, later) = match self.reading_order(other) {
            Ordering::Equal => return 0,
            Ordering::Less => (-1, self, other),
            Ordering::Greater => (1, other, self),
        };

        let distance = if earlier.is_adjacent_to(later) {
            1
        } else if earlier.book == later.book && earlier.chapter == later.chapter {
            2
        } else if earlier.book == later.book {
            3
        } else {
            4
        };
        sign * distance
    }

    /// Order by book ordinal, then book name, then chapter, then verse list.
    fn reading_order(&self, other: &Locator) -> Ordering {
        self.book
            .ordinal()
            .cmp(&other.book.ordinal())
            .then_with(|| self.book.name().cmp(other.book.name()))
            .then_with(|| self.chapter.cmp(&other.chapter))
            .then_with(|| self.verses.cmp(&other.verses))
    }

    /// Whether one verse step past this locator's last verse lands on `later`'s first verse.
    fn is_adjacent_to(&self, later: &Locator) -> bool {
        let (Some(last), Some(first)) = (self.last_verse(), later.first_verse()) else {
            return false;
        };
        let provider = self.hierarchy.as_deref().or(later.hierarchy.as_deref());
        let expected = Position {
            book: later.book.clone(),
            chapter: later.chapter,
            verse: Some(first),
        };
        verse_after(provider, &self.book, self.chapter, last).is_some_and(|step| step == expected)
    }
}

impl PartialOrd for Locator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).cmp(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse, parse_with};
    use crate::testing::fixture_canon;

    fn at(text: &str) -> Locator {
        parse_with(text, fixture_canon()).create()
    }

    fn compare(a: &str, b: &str) -> i32 {
        at(a).compare(&at(b))
    }

    #[test]
    fn test_equal() {
        assert_eq!(compare("BBBBB 2:20", "BBBBB 2:20"), 0);
        assert_eq!(compare("bbb 2:20", "BBBBB 2 20"), 0);
    }

    #[test]
    fn test_graded_distance() {
        assert_eq!(compare("BBBBB 2:20", "BBBBB 2:21"), -1);
        assert_eq!(compare("BBBBB 2:20", "BBBBB 2:22"), -2);
        assert_eq!(compare("BBBBB 2:20", "BBBBB 3:20"), -3);
        assert_eq!(compare("BBBBB 2:20", "CCCCC 1:20"), -4);
    }

    #[test]
    fn test_sign_follows_reading_order() {
        assert_eq!(compare("BBBBB 2:21", "BBBBB 2:20"), 1);
        assert_eq!(compare("CCCCC 1:20", "BBBBB 2:20"), 4);
    }

    #[test]
    fn test_adjacency_across_chapters_and_books() {
        assert_eq!(compare("AAAAA 1:6", "AAAAA 2:1"), -1);
        assert_eq!(compare("AAAAA 6:6", "BBBBB 1:1"), -1);
        assert_eq!(compare("BBBBB 1:1", "AAAAA 6:6"), 1);
        // not the last verse of the chapter
        assert_eq!(compare("AAAAA 1:5", "AAAAA 2:1"), -3);
    }

    #[test]
    fn test_adjacent_ranges() {
        assert_eq!(compare("BBBBB 2:1-5", "BBBBB 2:6-9"), -1);
        assert_eq!(compare("BBBBB 2:1-5", "BBBBB 2:5-9"), -2);
    }

    #[test]
    fn test_synthetic_books_sort_before_canon_books() {
        let synthetic = parse("Psalm 1:1").create();
        assert_eq!(synthetic.compare(&at("AAAAA 1:1")), -4);
    }

    #[test]
    fn test_synthetic_adjacency_without_hierarchy() {
        let a = parse("Psalm 1:3").create();
        let b = parse("Psalm 1:4").create();
        assert_eq!(a.compare(&b), -1);
        // whole chapters have no verse endpoints
        let whole = parse("Psalm 2").create();
        assert_eq!(a.compare(&whole), -3);
    }

    #[test]
    fn test_sort() {
        let mut locators = vec![at("CCCCC 1:5"), at("AAAAA 3:1"), at("BBBBB 1:1"), at("AAAAA 1:2")];
        locators.sort();
        let rendered: Vec<String> = locators.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["AAAAA 1:2", "AAAAA 3:1", "BBBBB 1:1", "CCCCC 1:5"]);
    }
}
