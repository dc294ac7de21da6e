//! Output formats for parsed citations
//!
//! A [`LocatorReport`] is the serializable summary of one parse: the input, the resulting
//! locator and the builder flags. Formatters render it as plain text, JSON or YAML.

pub mod registry;

pub use registry::{FormatError, FormatRegistry, Formatter};

use crate::builder::{BuilderFlag, BuilderFlags, LocatorBuilder};
use crate::locator::Locator;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct LocatorReport {
    pub input: String,
    pub reference: String,
    pub book: String,
    pub ordinal: u32,
    pub synthetic: bool,
    pub chapter: u32,
    pub verses: Vec<u32>,
    pub flags: BuilderFlags,
}

impl LocatorReport {
    /// Freeze `builder` and summarize the result.
    pub fn new(input: impl Into<String>, builder: &LocatorBuilder) -> Self {
        Self::from_locator(input, &builder.create(), builder.flags())
    }

    pub fn from_locator(input: impl Into<String>, locator: &Locator, flags: BuilderFlags) -> Self {
        LocatorReport {
            input: input.into(),
            reference: locator.to_string(),
            book: locator.book().name().to_string(),
            ordinal: locator.book().ordinal(),
            synthetic: locator.book().is_synthetic(),
            chapter: locator.chapter(),
            verses: locator.verses().to_vec(),
            flags,
        }
    }
}

const FLAG_NAMES: [(BuilderFlag, &str); 6] = [
    (BuilderFlag::Parsed, "parsed"),
    (BuilderFlag::ParseSucceeded, "parse-succeeded"),
    (BuilderFlag::ParseFailed, "parse-failed"),
    (BuilderFlag::DefaultBook, "default-book"),
    (BuilderFlag::DefaultChapter, "default-chapter"),
    (BuilderFlag::DefaultVerses, "default-verses"),
];

/// One line per report field, meant for people
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, report: &LocatorReport) -> Result<String, FormatError> {
        let flags: Vec<&str> = FLAG_NAMES
            .iter()
            .filter(|(flag, _)| report.flags.get(*flag))
            .map(|(_, name)| *name)
            .collect();

        let mut out = String::new();
        let book_kind = if report.synthetic {
            "synthetic".to_string()
        } else {
            format!("#{}", report.ordinal)
        };
        // writing to a String cannot fail
        let _ = writeln!(out, "{}", report.reference);
        let _ = writeln!(out, "  book:    {} ({book_kind})", report.book);
        let _ = writeln!(out, "  chapter: {}", report.chapter);
        let _ = writeln!(out, "  verses:  {}", report.verses.len());
        let _ = writeln!(out, "  flags:   {}", flags.join(", "));
        Ok(out)
    }

    fn description(&self) -> &str {
        "Canonical reference with a short summary"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, report: &LocatorReport) -> Result<String, FormatError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, report: &LocatorReport) -> Result<String, FormatError> {
        serde_yaml::to_string(report).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML document"
    }
}
