//! In-memory hierarchy
//!
//! A canon is an ordered list of books with verse tables. It can be built in code or loaded from
//! a YAML or JSON document shaped like:
//!
//! ```yaml
//! name: Sample
//! books:
//!   - name: Genesis
//!     abbreviation: Gen
//!     chapters: [31, 25, 24]
//!   - name: Exodus
//!     chapters: [22, 25]
//! ```
//!
//! Ordinals follow the declared order unless a book sets `ordinal` itself.

use super::{Book, HierarchyProvider};
use crate::error::HierarchyError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Canon {
    name: String,
    books: Vec<Book>,
}

#[derive(Debug, Deserialize)]
struct CanonFile {
    #[serde(default)]
    name: String,
    books: Vec<BookEntry>,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    name: String,
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(default)]
    ordinal: Option<u32>,
    chapters: Vec<u32>,
}

impl Canon {
    /// Build a canon from books, sorted by ordinal.
    pub fn new(name: impl Into<String>, mut books: Vec<Book>) -> Self {
        books.sort_by_key(|book| book.ordinal());
        Canon {
            name: name.into(),
            books,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, HierarchyError> {
        let file: CanonFile = serde_yaml::from_str(source)?;
        Self::from_file(file)
    }

    pub fn from_json_str(source: &str) -> Result<Self, HierarchyError> {
        let file: CanonFile = serde_json::from_str(source)?;
        Self::from_file(file)
    }

    /// Load a canon file, choosing the format from its extension (`yaml`, `yml`, `json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HierarchyError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| HierarchyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let canon = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&source)?,
            "json" => Self::from_json_str(&source)?,
            other => return Err(HierarchyError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), books = canon.len(), "loaded canon");
        Ok(canon)
    }

    fn from_file(file: CanonFile) -> Result<Self, HierarchyError> {
        if file.books.is_empty() {
            return Err(HierarchyError::Empty(file.name));
        }

        let mut books = Vec::with_capacity(file.books.len());
        for (index, entry) in file.books.into_iter().enumerate() {
            if entry.chapters.is_empty() {
                return Err(HierarchyError::NoChapters { book: entry.name });
            }
            if let Some(empty) = entry.chapters.iter().position(|&verses| verses == 0) {
                return Err(HierarchyError::EmptyChapter {
                    book: entry.name,
                    chapter: empty as u32 + 1,
                });
            }
            let ordinal = entry.ordinal.unwrap_or(index as u32 + 1);
            if ordinal == 0 {
                return Err(HierarchyError::ReservedOrdinal { book: entry.name });
            }
            let mut book = Book::new(ordinal, entry.name, entry.chapters);
            if let Some(abbreviation) = entry.abbreviation {
                book = book.with_abbreviation(abbreviation);
            }
            books.push(book);
        }

        Ok(Canon::new(file.name, books))
    }
}

impl HierarchyProvider for Canon {
    /// The first book in canon order that matches by name, abbreviation or prefix wins.
    fn find_book(&self, name: &str) -> Option<Book> {
        let found = self
            .books
            .iter()
            .find_map(|book| book.match_name(name).map(|strength| (strength, book)));

        match found {
            Some((strength, book)) => {
                tracing::debug!(query = name, book = book.name(), ?strength, "resolved book");
                Some(book.clone())
            }
            None => {
                tracing::debug!(query = name, canon = %self.name, "no book matched");
                None
            }
        }
    }

    fn book_at(&self, ordinal: u32) -> Option<Book> {
        self.books
            .iter()
            .find(|book| book.ordinal() == ordinal)
            .cloned()
    }

    fn successor(&self, book: &Book) -> Option<Book> {
        let index = self.books.iter().position(|b| b == book)?;
        self.books.get(index + 1).cloned()
    }

    fn predecessor(&self, book: &Book) -> Option<Book> {
        let index = self.books.iter().position(|b| b == book)?;
        index
            .checked_sub(1)
            .and_then(|prev| self.books.get(prev))
            .cloned()
    }
}
