//! Immutable passage locator
//!
//! A locator names one or more verses in one chapter of one book. Locators are only produced by
//! [`LocatorBuilder::create`](crate::builder::LocatorBuilder::create), so their chapter and
//! verses are always within the bounds the hierarchy reported at creation time.
//!
//! The canonical rendering is `"Book C:V"` with consecutive verses collapsed into ranges and
//! separate runs joined by commas (`"Galatians 2:1-8,19-21"`). Parsing that text again yields an
//! equal locator. A synthetic book whose verse list is empty renders as `"Book C"`.

pub mod navigation;
pub mod ordering;

pub use navigation::Granularity;

use crate::builder::LocatorBuilder;
use crate::hierarchy::{Book, HierarchyProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone, Serialize, Deserialize)]
pub struct Locator {
    book: Book,
    chapter: u32,
    verses: Vec<u32>,
    #[serde(skip)]
    hierarchy: Option<Arc<dyn HierarchyProvider>>,
}

impl Locator {
    pub(crate) fn new(
        book: Book,
        chapter: u32,
        verses: Vec<u32>,
        hierarchy: Option<Arc<dyn HierarchyProvider>>,
    ) -> Self {
        Locator {
            book,
            chapter,
            verses,
            hierarchy,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// Ascending, duplicate-free verse numbers. Empty only for a whole chapter of a synthetic
    /// book.
    pub fn verses(&self) -> &[u32] {
        &self.verses
    }

    pub fn first_verse(&self) -> Option<u32> {
        self.verses.first().copied()
    }

    pub fn last_verse(&self) -> Option<u32> {
        self.verses.last().copied()
    }

    pub fn hierarchy(&self) -> Option<&Arc<dyn HierarchyProvider>> {
        self.hierarchy.as_ref()
    }

    /// Attach a hierarchy, e.g. after deserializing.
    pub fn with_hierarchy(mut self, hierarchy: Arc<dyn HierarchyProvider>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// A builder seeded with this locator's book, chapter and verses.
    pub fn to_builder(&self) -> LocatorBuilder {
        let mut builder = LocatorBuilder::with_optional_hierarchy(self.hierarchy.clone());
        builder
            .set_book_entry(self.book.clone())
            .set_chapter(self.chapter)
            .set_verses(self.verses.iter().copied());
        builder
    }

    /// Consecutive verse runs as inclusive `(first, last)` pairs.
    pub fn verse_runs(&self) -> Vec<(u32, u32)> {
        let mut runs: Vec<(u32, u32)> = Vec::new();
        for &verse in &self.verses {
            match runs.last_mut() {
                Some((_, end)) if end.checked_add(1) == Some(verse) => *end = verse,
                _ => runs.push((verse, verse)),
            }
        }
        runs
    }
}

impl PartialEq for Locator {
    fn eq(&self, other: &Self) -> bool {
        self.book == other.book && self.chapter == other.chapter && self.verses == other.verses
    }
}

impl Eq for Locator {}

impl Hash for Locator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.book.hash(state);
        self.chapter.hash(state);
        self.verses.hash(state);
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("book", &self.book.name())
            .field("chapter", &self.chapter)
            .field("verses", &self.verses)
            .finish()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.book.name().is_empty() {
            write!(f, "{} ", self.book.name())?;
        }
        write!(f, "{}", self.chapter)?;

        let runs = self.verse_runs();
        if runs.is_empty() {
            return Ok(());
        }

        write!(f, ":")?;
        for (i, (start, end)) in runs.into_iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
        }
        Ok(())
    }
}
