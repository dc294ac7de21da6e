//! Error types
//!
//! Parsing and clamping never fail; they record what they had to repair in builder flags.
//! The errors here cover the places where guessing would be wrong: stepping off either end of
//! a hierarchy, loading a canon from disk, and misusing typed metadata.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while navigating between locators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("no book follows {book}")]
    NoSuccessor { book: String },
    #[error("no book precedes {book}")]
    NoPredecessor { book: String },
}

/// Errors raised while loading a hierarchy
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML canon: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON canon: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported canon file extension: {0}")]
    UnsupportedFormat(String),
    #[error("canon '{0}' has no books")]
    Empty(String),
    #[error("book '{book}' in canon has no chapters")]
    NoChapters { book: String },
    #[error("book '{book}' in canon uses ordinal 0, which is reserved for synthetic books")]
    ReservedOrdinal { book: String },
    #[error("chapter {chapter} of book '{book}' in canon has no verses")]
    EmptyChapter { book: String, chapter: u32 },
}

/// Errors raised by typed metadata access and metadata-driven sorting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("key [{key}] expected a value of type [{expected}], found [{found}]")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("no value at key [{0}] on one or both passages")]
    MissingKey(String),
    #[error("values at key [{key}] cannot be compared: {reason}")]
    NotComparable { key: String, reason: String },
}

/// Errors raised by the hierarchy registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no hierarchy registered under '{0}'")]
    UnknownKey(String),
    #[error("no hierarchy selected")]
    NothingSelected,
}
