//! Citation parsing
//!
//! Parsing never fails outright. Whatever the grammar can recognize is written into a
//! [`LocatorBuilder`]; missing or out-of-range parts are filled in by the builder's defaults,
//! and [`BuilderFlag::ParseFailed`](crate::builder::BuilderFlag::ParseFailed) tells callers the
//! text did not name both a book and a chapter.

pub mod grammar;

pub use grammar::{PassageParser, MAX_RANGE_SPAN};

use crate::builder::LocatorBuilder;
use crate::hierarchy::HierarchyProvider;
use std::sync::Arc;

/// Parse citation text without a hierarchy. Every book is synthetic.
pub fn parse(text: &str) -> LocatorBuilder {
    let mut builder = LocatorBuilder::new();
    builder.parse(text);
    builder
}

/// Parse citation text, resolving names and bounds against `hierarchy`.
pub fn parse_with(text: &str, hierarchy: Arc<dyn HierarchyProvider>) -> LocatorBuilder {
    let mut builder = LocatorBuilder::with_hierarchy(hierarchy);
    builder.parse(text);
    builder
}
