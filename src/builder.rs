//! Locator builder
//!
//! The builder is the mutable half of a locator. The parser writes candidate values into it,
//! callers may adjust them, and [`LocatorBuilder::create`] freezes the current state into an
//! immutable [`Locator`].
//!
//! Every setter checks its value against the hierarchy and repairs what it can: out-of-range
//! chapters and verses are clamped to the nearest valid value, and unknown book names become
//! synthetic books. Each repair is recorded in a [`BuilderFlag`] so callers can tell a clean
//! citation from one that was guessed at. Flags are independent of each other and keep their
//! value until the matching setter runs again.
//!
//! A builder is not synchronized. Threads that need to build locators concurrently should each
//! own a builder; the hierarchy behind them can be shared.

use crate::hierarchy::{self, Book, HierarchyProvider};
use crate::locator::Locator;
use crate::parsing::PassageParser;
use serde::Serialize;
use std::sync::Arc;

/// Status flags recorded by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderFlag {
    /// A parse has run to completion
    Parsed,
    ParseSucceeded,
    /// The text did not name a book or a chapter; defaults fill the gaps
    ParseFailed,
    /// The book name did not resolve and a synthetic book stands in for it
    DefaultBook,
    /// The requested chapter was out of range and got clamped
    DefaultChapter,
    /// The verse list was clamped or replaced by the whole chapter
    DefaultVerses,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuilderFlags {
    pub parsed: bool,
    pub parse_succeeded: bool,
    pub parse_failed: bool,
    pub default_book: bool,
    pub default_chapter: bool,
    pub default_verses: bool,
}

impl BuilderFlags {
    pub fn get(&self, flag: BuilderFlag) -> bool {
        match flag {
            BuilderFlag::Parsed => self.parsed,
            BuilderFlag::ParseSucceeded => self.parse_succeeded,
            BuilderFlag::ParseFailed => self.parse_failed,
            BuilderFlag::DefaultBook => self.default_book,
            BuilderFlag::DefaultChapter => self.default_chapter,
            BuilderFlag::DefaultVerses => self.default_verses,
        }
    }

    fn set(&mut self, flag: BuilderFlag, value: bool) {
        let slot = match flag {
            BuilderFlag::Parsed => &mut self.parsed,
            BuilderFlag::ParseSucceeded => &mut self.parse_succeeded,
            BuilderFlag::ParseFailed => &mut self.parse_failed,
            BuilderFlag::DefaultBook => &mut self.default_book,
            BuilderFlag::DefaultChapter => &mut self.default_chapter,
            BuilderFlag::DefaultVerses => &mut self.default_verses,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocatorBuilder {
    hierarchy: Option<Arc<dyn HierarchyProvider>>,
    book: Option<Book>,
    chapter: Option<u32>,
    verses: Vec<u32>,
    flags: BuilderFlags,
}

impl LocatorBuilder {
    /// A builder with no hierarchy; every book will be synthetic.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hierarchy(hierarchy: Arc<dyn HierarchyProvider>) -> Self {
        LocatorBuilder {
            hierarchy: Some(hierarchy),
            ..Self::default()
        }
    }

    pub(crate) fn with_optional_hierarchy(hierarchy: Option<Arc<dyn HierarchyProvider>>) -> Self {
        LocatorBuilder {
            hierarchy,
            ..Self::default()
        }
    }

    pub fn set_hierarchy(&mut self, hierarchy: Arc<dyn HierarchyProvider>) -> &mut Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn hierarchy(&self) -> Option<&Arc<dyn HierarchyProvider>> {
        self.hierarchy.as_ref()
    }

    /// Parse citation text into this builder, replacing any previous candidates and parse flags.
    pub fn parse(&mut self, text: &str) -> &mut Self {
        self.book = None;
        self.chapter = None;
        self.verses.clear();
        self.flags = BuilderFlags::default();

        PassageParser::new(self).parse(text);
        self
    }

    /// Resolve `name` against the hierarchy, falling back to a synthetic book.
    pub fn set_book(&mut self, name: &str) -> &mut Self {
        let found = self
            .hierarchy
            .as_ref()
            .and_then(|provider| provider.find_book(name));

        match found {
            Some(book) => {
                self.book = Some(book);
                self.flags.set(BuilderFlag::DefaultBook, false);
            }
            None => {
                tracing::debug!(name, "book did not resolve, using a synthetic book");
                self.book = Some(Book::synthetic(name));
                self.flags.set(BuilderFlag::DefaultBook, true);
            }
        }
        self
    }

    /// Install an already-resolved book.
    pub fn set_book_entry(&mut self, book: Book) -> &mut Self {
        self.book = Some(book);
        self.flags.set(BuilderFlag::DefaultBook, false);
        self
    }

    /// Set the chapter, clamped into `1..=chapter_count`. Unbounded books only clamp below.
    pub fn set_chapter(&mut self, chapter: u32) -> &mut Self {
        let (clamped, changed) = self.clamp_chapter(self.book.as_ref(), chapter);
        if changed {
            tracing::debug!(requested = chapter, clamped, "chapter out of range");
        }
        self.chapter = Some(clamped);
        self.flags.set(BuilderFlag::DefaultChapter, changed);
        self
    }

    pub fn set_default_chapter(&mut self) -> &mut Self {
        self.chapter = Some(1);
        self.flags.set(BuilderFlag::DefaultChapter, true);
        self
    }

    /// Replace the verse list. Each verse is clamped into `1..=verse_count` for the current
    /// chapter; the result is sorted and de-duplicated. An empty list selects the whole chapter.
    pub fn set_verses<I>(&mut self, verses: I) -> &mut Self
    where
        I: IntoIterator<Item = u32>,
    {
        let limit = self.current_verse_limit();
        let mut clamped_any = false;
        let mut list: Vec<u32> = verses
            .into_iter()
            .map(|verse| {
                let clamped = clamp_verse(verse, limit);
                clamped_any |= clamped != verse;
                clamped
            })
            .collect();

        if list.is_empty() {
            return self.set_default_verses();
        }

        list.sort_unstable();
        list.dedup();
        if clamped_any {
            tracing::debug!(?limit, verses = ?list, "verses clamped");
        }
        self.verses = list;
        self.flags.set(BuilderFlag::DefaultVerses, clamped_any);
        self
    }

    /// Append one raw candidate verse. Clamping happens in [`create`](Self::create).
    pub fn add_verse(&mut self, verse: u32) -> &mut Self {
        self.verses.push(verse);
        self
    }

    /// Select the whole chapter.
    pub fn set_default_verses(&mut self) -> &mut Self {
        self.verses.clear();
        self.flags.set(BuilderFlag::DefaultVerses, true);
        self
    }

    /// Record that the verse list was shortened before it reached [`set_verses`](Self::set_verses).
    pub(crate) fn mark_verses_clamped(&mut self) {
        self.flags.set(BuilderFlag::DefaultVerses, true);
    }

    pub(crate) fn finish_parse(&mut self, succeeded: bool) {
        self.flags.set(BuilderFlag::Parsed, true);
        self.flags.set(BuilderFlag::ParseSucceeded, succeeded);
        self.flags.set(BuilderFlag::ParseFailed, !succeeded);
    }

    pub fn check_flag(&self, flag: BuilderFlag) -> bool {
        self.flags.get(flag)
    }

    pub fn flags(&self) -> BuilderFlags {
        self.flags
    }

    pub fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    /// The candidate chapter, 1 if none was set.
    pub fn chapter(&self) -> u32 {
        self.chapter.unwrap_or(1)
    }

    /// The candidate verses. Empty means "whole chapter".
    pub fn verses(&self) -> &[u32] {
        &self.verses
    }

    /// Freeze the current state into a locator.
    ///
    /// Chapter and verses are clamped once more against the final book, since the book may
    /// have changed after they were set. An empty verse list expands to the whole chapter when
    /// its length is known.
    pub fn create(&self) -> Locator {
        let book = self.book.clone().unwrap_or_else(|| Book::synthetic(""));
        let (chapter, _) = self.clamp_chapter(Some(&book), self.chapter());
        let limit = hierarchy::verse_limit(self.hierarchy.as_deref(), &book, chapter);

        let mut verses: Vec<u32> = self
            .verses
            .iter()
            .map(|&verse| clamp_verse(verse, limit))
            .collect();
        verses.sort_unstable();
        verses.dedup();

        if verses.is_empty() {
            if let Some(max) = limit {
                verses = (1..=max.max(1)).collect();
            }
        }

        Locator::new(book, chapter, verses, self.hierarchy.clone())
    }

    fn clamp_chapter(&self, book: Option<&Book>, chapter: u32) -> (u32, bool) {
        if chapter < 1 {
            return (1, true);
        }
        let limit =
            book.and_then(|book| hierarchy::chapter_limit(self.hierarchy.as_deref(), book));
        match limit {
            Some(max) if chapter > max => (max.max(1), true),
            _ => (chapter, false),
        }
    }

    fn current_verse_limit(&self) -> Option<u32> {
        let book = self.book.as_ref()?;
        hierarchy::verse_limit(self.hierarchy.as_deref(), book, self.chapter())
    }
}

fn clamp_verse(verse: u32, limit: Option<u32>) -> u32 {
    match limit {
        Some(max) => verse.clamp(1, max.max(1)),
        None => verse.max(1),
    }
}
