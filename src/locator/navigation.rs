//! Stepping between locators
//!
//! `next` and `previous` move by verse, chapter or book and cross chapter and book boundaries.
//! Results come back as builders, so the usual clamping and flags apply before they are frozen.
//!
//! Stepping off either end of the hierarchy is an error; navigation never wraps around. A
//! locator without a hierarchy has no neighbouring books at all.
//!
//! Book-level `previous` lands on the *first* chapter of the previous book, while chapter-level
//! `previous` across a book boundary lands on its *last* chapter.

use super::Locator;
use crate::builder::LocatorBuilder;
use crate::error::LocatorError;
use crate::hierarchy::{self, Book, HierarchyProvider};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Verse,
    Chapter,
    Book,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verse" | "v" => Ok(Granularity::Verse),
            "chapter" | "c" => Ok(Granularity::Chapter),
            "book" | "b" => Ok(Granularity::Book),
            other => Err(format!("unknown granularity '{other}'")),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Verse => "verse",
            Granularity::Chapter => "chapter",
            Granularity::Book => "book",
        };
        write!(f, "{name}")
    }
}

/// A single position in the hierarchy. `verse: None` means "the whole chapter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Position {
    pub book: Book,
    pub chapter: u32,
    pub verse: Option<u32>,
}

impl Locator {
    pub fn next(&self, granularity: Granularity) -> Result<LocatorBuilder, LocatorError> {
        let target = match granularity {
            Granularity::Verse => match self.last_verse() {
                Some(last) => verse_after(self.provider(), &self.book, self.chapter, last),
                None => self.chapter_after().map(|(book, chapter)| Position {
                    book,
                    chapter,
                    verse: Some(1),
                }),
            },
            Granularity::Chapter => self.chapter_after().map(|(book, chapter)| Position {
                book,
                chapter,
                verse: None,
            }),
            Granularity::Book => self.successor().map(|book| Position {
                book,
                chapter: 1,
                verse: None,
            }),
        }
        .ok_or_else(|| LocatorError::NoSuccessor {
            book: self.book.name().to_string(),
        })?;

        tracing::debug!(from = %self, %granularity, to = ?target, "next");
        Ok(self.builder_at(target))
    }

    pub fn previous(&self, granularity: Granularity) -> Result<LocatorBuilder, LocatorError> {
        let target = match granularity {
            Granularity::Verse => {
                let first = self.first_verse().unwrap_or(1);
                if first > 1 {
                    Some(Position {
                        book: self.book.clone(),
                        chapter: self.chapter,
                        verse: Some(first - 1),
                    })
                } else {
                    self.chapter_before().map(|(book, chapter)| Position {
                        verse: hierarchy::verse_limit(self.provider(), &book, chapter),
                        book,
                        chapter,
                    })
                }
            }
            Granularity::Chapter => self.chapter_before().map(|(book, chapter)| Position {
                book,
                chapter,
                verse: None,
            }),
            Granularity::Book => self.predecessor().map(|book| Position {
                book,
                chapter: 1,
                verse: None,
            }),
        }
        .ok_or_else(|| LocatorError::NoPredecessor {
            book: self.book.name().to_string(),
        })?;

        tracing::debug!(from = %self, %granularity, to = ?target, "previous");
        Ok(self.builder_at(target))
    }

    fn provider(&self) -> Option<&dyn HierarchyProvider> {
        self.hierarchy.as_deref()
    }

    fn successor(&self) -> Option<Book> {
        self.provider()?.successor(&self.book)
    }

    fn predecessor(&self) -> Option<Book> {
        self.provider()?.predecessor(&self.book)
    }

    /// The chapter after this one, in this book or the first chapter of the next.
    fn chapter_after(&self) -> Option<(Book, u32)> {
        chapter_after(self.provider(), &self.book, self.chapter)
    }

    /// The chapter before this one, in this book or the last chapter of the previous.
    fn chapter_before(&self) -> Option<(Book, u32)> {
        if self.chapter > 1 {
            return Some((self.book.clone(), self.chapter - 1));
        }
        let previous = self.predecessor()?;
        let last = hierarchy::chapter_limit(self.provider(), &previous).unwrap_or(1);
        Some((previous, last))
    }

    fn builder_at(&self, target: Position) -> LocatorBuilder {
        let mut builder = LocatorBuilder::with_optional_hierarchy(self.hierarchy.clone());
        builder
            .set_book_entry(target.book)
            .set_chapter(target.chapter);
        match target.verse {
            Some(verse) => builder.set_verses([verse]),
            None => builder.set_default_verses(),
        };
        builder
    }
}

fn chapter_after(
    provider: Option<&dyn HierarchyProvider>,
    book: &Book,
    chapter: u32,
) -> Option<(Book, u32)> {
    let has_next = match hierarchy::chapter_limit(provider, book) {
        Some(count) => chapter < count,
        None => true,
    };
    if has_next {
        return Some((book.clone(), chapter.checked_add(1)?));
    }
    let next = provider?.successor(book)?;
    Some((next, 1))
}

/// The verse position one step after `verse`, crossing chapters and books.
pub(crate) fn verse_after(
    provider: Option<&dyn HierarchyProvider>,
    book: &Book,
    chapter: u32,
    verse: u32,
) -> Option<Position> {
    let in_chapter = match hierarchy::verse_limit(provider, book, chapter) {
        Some(count) => verse < count,
        None => true,
    };
    if in_chapter {
        return Some(Position {
            book: book.clone(),
            chapter,
            verse: Some(verse.checked_add(1)?),
        });
    }
    chapter_after(provider, book, chapter).map(|(book, chapter)| Position {
        book,
        chapter,
        verse: Some(1),
    })
}
