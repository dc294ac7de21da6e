//! Book / chapter / verse hierarchy
//!
//! The parser and locator never own the shape of a text. They ask a [`HierarchyProvider`] to
//! resolve book names and report chapter and verse counts. [`Canon`] is the in-memory provider
//! shipped with the crate. Anything else (a database, a remote catalogue) can implement the trait.
//!
//! When no provider is available, or a name does not resolve, the builder falls back to a
//! synthetic book whose chapters are [`Chapters::Unbounded`]: every positive chapter and verse is
//! accepted as-is.

pub mod canon;

pub use canon::Canon;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Verse counts for each chapter of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chapters {
    /// No known bounds, used for synthetic books
    Unbounded,
    /// `counts[i]` is the number of verses in chapter `i + 1`
    Counted(Vec<u32>),
}

/// A top-level division of the text (a book of the Bible, a volume, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    name: String,
    abbreviation: String,
    ordinal: u32,
    chapters: Chapters,
}

impl Book {
    /// Create a book with known chapters. The abbreviation defaults to the first three
    /// characters of the name.
    pub fn new(ordinal: u32, name: impl Into<String>, verse_counts: Vec<u32>) -> Self {
        let name = name.into();
        Book {
            abbreviation: default_abbreviation(&name),
            name,
            ordinal,
            chapters: Chapters::Counted(verse_counts),
        }
    }

    /// A placeholder for names no provider could resolve. Ordinal 0, no bounds.
    pub fn synthetic(name: impl Into<String>) -> Self {
        let name = name.into();
        Book {
            abbreviation: default_abbreviation(&name),
            name,
            ordinal: 0,
            chapters: Chapters::Unbounded,
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = abbreviation.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// 1-based position among sibling books; 0 for synthetic books
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn chapters(&self) -> &Chapters {
        &self.chapters
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.chapters, Chapters::Unbounded)
    }

    /// Number of chapters, or `None` when the book is unbounded.
    pub fn chapter_count(&self) -> Option<u32> {
        match &self.chapters {
            Chapters::Unbounded => None,
            Chapters::Counted(counts) => Some(counts.len() as u32),
        }
    }

    /// Number of verses in a 1-based chapter. `None` when unbounded or out of range.
    pub fn verse_count(&self, chapter: u32) -> Option<u32> {
        match &self.chapters {
            Chapters::Unbounded => None,
            Chapters::Counted(counts) => chapter
                .checked_sub(1)
                .and_then(|index| counts.get(index as usize))
                .copied(),
        }
    }

    pub fn has_chapter(&self, chapter: u32) -> bool {
        chapter >= 1 && self.chapter_count().map_or(true, |count| chapter <= count)
    }

    /// Whether `candidate` names this book.
    ///
    /// Exact matches on the full name or abbreviation win over prefix matches (see
    /// [`NameMatch`]). Comparison folds case with Unicode lowercasing.
    pub fn match_name(&self, candidate: &str) -> Option<NameMatch> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }
        if same_ignoring_case(candidate, &self.name) {
            Some(NameMatch::Name)
        } else if same_ignoring_case(candidate, &self.abbreviation) {
            Some(NameMatch::Abbreviation)
        } else if shared_prefix_matches(candidate, &self.name)
            || shared_prefix_matches(candidate, &self.abbreviation)
        {
            Some(NameMatch::Prefix)
        } else {
            None
        }
    }
}

/// How a name matched a book, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameMatch {
    Name,
    Abbreviation,
    Prefix,
}

// Books are identified by position and name; verse tables may differ between versions of the
// same text.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.name == other.name
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordinal.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn default_abbreviation(name: &str) -> String {
    name.chars().take(3).collect()
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Compare the first `min(len(a), len(b))` characters, ignoring case.
fn shared_prefix_matches(a: &str, b: &str) -> bool {
    let len = a.chars().count().min(b.chars().count());
    if len == 0 {
        return false;
    }
    a.chars()
        .take(len)
        .zip(b.chars().take(len))
        .all(|(x, y)| x.to_lowercase().eq(y.to_lowercase()))
}

/// Source of book names and chapter/verse bounds.
///
/// Every method is a pure lookup. Implementations that do I/O are responsible for their own
/// caching and retry policy; callers assume nothing about cost.
pub trait HierarchyProvider: fmt::Debug + Send + Sync {
    /// Resolve a user-written book name.
    fn find_book(&self, name: &str) -> Option<Book>;

    /// The book at a 1-based ordinal.
    fn book_at(&self, ordinal: u32) -> Option<Book>;

    fn chapter_count(&self, book: &Book) -> Option<u32> {
        book.chapter_count()
    }

    fn verse_count(&self, book: &Book, chapter: u32) -> Option<u32> {
        book.verse_count(chapter)
    }

    fn successor(&self, book: &Book) -> Option<Book> {
        if book.ordinal() == 0 {
            return None;
        }
        self.book_at(book.ordinal().checked_add(1)?)
    }

    fn predecessor(&self, book: &Book) -> Option<Book> {
        if book.ordinal() <= 1 {
            return None;
        }
        self.book_at(book.ordinal() - 1)
    }
}

/// Chapter count for `book`, asking the provider when there is one.
pub(crate) fn chapter_limit(hierarchy: Option<&dyn HierarchyProvider>, book: &Book) -> Option<u32> {
    match hierarchy {
        Some(provider) => provider.chapter_count(book),
        None => book.chapter_count(),
    }
}

/// Verse count for `book` and `chapter`, asking the provider when there is one.
pub(crate) fn verse_limit(
    hierarchy: Option<&dyn HierarchyProvider>,
    book: &Book,
    chapter: u32,
) -> Option<u32> {
    match hierarchy {
        Some(provider) => provider.verse_count(book, chapter),
        None => book.verse_count(chapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_abbreviation() {
        assert_eq!(Book::new(1, "Genesis", vec![31]).abbreviation(), "Gen");
        assert_eq!(Book::new(1, "Job", vec![22]).abbreviation(), "Job");
        assert_eq!(Book::new(1, "Am", vec![15]).abbreviation(), "Am");
    }

    #[test]
    fn test_counts() {
        let book = Book::new(2, "BBBBB", vec![56, 43, 23]);
        assert_eq!(book.chapter_count(), Some(3));
        assert_eq!(book.verse_count(2), Some(43));
        assert_eq!(book.verse_count(0), None);
        assert_eq!(book.verse_count(4), None);
        assert!(book.has_chapter(3));
        assert!(!book.has_chapter(4));
    }

    #[test]
    fn test_synthetic_is_unbounded() {
        let book = Book::synthetic("Psalm");
        assert!(book.is_synthetic());
        assert_eq!(book.ordinal(), 0);
        assert_eq!(book.chapter_count(), None);
        assert_eq!(book.verse_count(150), None);
        assert!(book.has_chapter(150));
    }

    #[test]
    fn test_match_name() {
        let book = Book::new(20, "Proverbs", vec![33]).with_abbreviation("Prov");
        assert_eq!(book.match_name("proverbs"), Some(NameMatch::Name));
        assert_eq!(book.match_name("PROV"), Some(NameMatch::Abbreviation));
        assert_eq!(book.match_name("Proverb"), Some(NameMatch::Prefix));
        assert_eq!(book.match_name("Pr"), Some(NameMatch::Prefix));
        assert_eq!(book.match_name("Psalms"), None);
        assert_eq!(book.match_name(""), None);
    }

    #[test]
    fn test_match_name_folds_non_ascii_case() {
        let book = Book::new(23, "Ésaïe", vec![31, 22]).with_abbreviation("És");
        assert_eq!(book.match_name("ÉSAÏE"), Some(NameMatch::Name));
        assert_eq!(book.match_name("és"), Some(NameMatch::Abbreviation));
        assert_eq!(book.match_name("ésa"), Some(NameMatch::Prefix));
        assert_eq!(book.match_name("Esaie"), None);
    }

    #[test]
    fn test_equality_ignores_verse_tables() {
        let a = Book::new(3, "CCCCC", vec![99]);
        let b = Book::new(3, "CCCCC", vec![98, 2]);
        assert_eq!(a, b);
        assert_ne!(a, Book::synthetic("CCCCC"));
    }
}
