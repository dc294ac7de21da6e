//! Test fixtures and fluent assertions
//!
//! The fixture canons are tiny texts with easy-to-check bounds. Tests should resolve citations
//! against them instead of a real canon, so expectations can be verified by hand:
//!
//! | book  | verses per chapter          |
//! |-------|-----------------------------|
//! | AAAAA | 6, 4, 24, 21, 17, 6         |
//! | BBBBB | 56, 43, 23                  |
//! | CCCCC | 99                          |
//!
//! [`extended_canon`] appends DDDDD (powers of two) and EEEEE (Fibonacci numbers).
//!
//! Assertions are fluent and panic with the rendered locator in the message:
//!
//! ```rust-example
//! let locator = parse_with("BBBBB 2:20-40", fixture_canon()).create();
//! assert_locator(&locator)
//!     .book("BBBBB")
//!     .chapter(2)
//!     .verses(20..=40)
//!     .renders("BBBBB 2:20-40");
//! ```

use crate::builder::{BuilderFlag, LocatorBuilder};
use crate::hierarchy::{Book, Canon, HierarchyProvider};
use crate::locator::Locator;
use std::sync::Arc;

fn fixture_books() -> Vec<Book> {
    vec![
        Book::new(1, "AAAAA", vec![6, 4, 24, 21, 17, 6]),
        Book::new(2, "BBBBB", vec![56, 43, 23]),
        Book::new(3, "CCCCC", vec![99]),
    ]
}

/// AAAAA, BBBBB and CCCCC
pub fn fixture_canon() -> Arc<dyn HierarchyProvider> {
    Arc::new(Canon::new("Fixture", fixture_books()))
}

/// The fixture canon followed by DDDDD and EEEEE
pub fn extended_canon() -> Arc<dyn HierarchyProvider> {
    let mut books = fixture_books();
    books.push(Book::new(4, "DDDDD", vec![1, 2, 4, 8, 16, 32, 64]));
    books.push(Book::new(5, "EEEEE", vec![1, 1, 2, 3, 5, 8, 13, 21]));
    Arc::new(Canon::new("Extended fixture", books))
}

pub fn assert_locator(locator: &Locator) -> LocatorAssertion<'_> {
    LocatorAssertion { locator }
}

pub struct LocatorAssertion<'a> {
    locator: &'a Locator,
}

impl LocatorAssertion<'_> {
    pub fn book(self, name: &str) -> Self {
        assert_eq!(
            self.locator.book().name(),
            name,
            "book of {}",
            self.locator
        );
        self
    }

    pub fn synthetic(self, expected: bool) -> Self {
        assert_eq!(
            self.locator.book().is_synthetic(),
            expected,
            "synthetic book in {}",
            self.locator
        );
        self
    }

    pub fn chapter(self, chapter: u32) -> Self {
        assert_eq!(self.locator.chapter(), chapter, "chapter of {}", self.locator);
        self
    }

    pub fn verses<I: IntoIterator<Item = u32>>(self, verses: I) -> Self {
        let expected: Vec<u32> = verses.into_iter().collect();
        assert_eq!(self.locator.verses(), expected.as_slice(), "verses of {}", self.locator);
        self
    }

    /// Whole-chapter locator of a synthetic book
    pub fn whole_chapter(self) -> Self {
        assert!(
            self.locator.verses().is_empty(),
            "expected a whole chapter, got {}",
            self.locator
        );
        self
    }

    pub fn renders(self, text: &str) -> Self {
        assert_eq!(self.locator.to_string(), text);
        self
    }
}

pub fn assert_flags(builder: &LocatorBuilder) -> FlagAssertion<'_> {
    FlagAssertion { builder }
}

pub struct FlagAssertion<'a> {
    builder: &'a LocatorBuilder,
}

impl FlagAssertion<'_> {
    pub fn set(self, flag: BuilderFlag) -> Self {
        assert!(self.builder.check_flag(flag), "expected {flag:?} to be set");
        self
    }

    pub fn unset(self, flag: BuilderFlag) -> Self {
        assert!(!self.builder.check_flag(flag), "expected {flag:?} to be unset");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_with;

    #[test]
    fn test_fixture_bounds() {
        let canon = fixture_canon();
        let book = canon.book_at(2).unwrap();
        assert_eq!(canon.chapter_count(&book), Some(3));
        assert_eq!(canon.verse_count(&book, 1), Some(56));
        assert!(canon.book_at(4).is_none());
        assert!(extended_canon().book_at(5).is_some());
    }

    #[test]
    fn test_fluent_assertions() {
        let builder = parse_with("BBBBB 2:20-40", fixture_canon());
        assert_flags(&builder)
            .set(BuilderFlag::ParseSucceeded)
            .unset(BuilderFlag::DefaultVerses);
        assert_locator(&builder.create())
            .book("BBBBB")
            .synthetic(false)
            .chapter(2)
            .verses(20..=40)
            .renders("BBBBB 2:20-40");
    }

    #[test]
    #[should_panic(expected = "chapter of BBBBB 2:20-40")]
    fn test_assertion_failure_names_the_locator() {
        let locator = parse_with("BBBBB 2:20-40", fixture_canon()).create();
        assert_locator(&locator).chapter(3);
    }
}
