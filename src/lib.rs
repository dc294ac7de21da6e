//! # versicle
//!
//! Parse, order and navigate book / chapter / verse citations.
//!
//! ```text
//! text ──lexing──▶ tokens ──parsing──▶ LocatorBuilder ──create()──▶ Locator
//!                                            ▲                        │
//!                                            └── next / previous ◀────┘
//! ```
//!
//! Free-form citations such as `"Eph. 1:1 through 8"` or `"Galatians 2: 1-5, 19-21, 4-8"` are
//! lexed and parsed into a [`LocatorBuilder`]. The builder resolves the book against a
//! [`HierarchyProvider`], clamps the chapter and verses to what the book actually contains, and
//! records every repair as a [`BuilderFlag`]. [`LocatorBuilder::create`] freezes the result into
//! an immutable [`Locator`].
//!
//! Locators render canonically (`"Galatians 2:1-8,19-21"`), compare with a graded distance
//! ([`Locator::compare`]) and step by verse, chapter or book ([`Locator::next`],
//! [`Locator::previous`]).
//!
//! Without a hierarchy every book is synthetic: any positive chapter and verse is accepted, and
//! navigation never leaves the book.
//!
//! ## Testing
//!
//! Fixture canons and fluent assertions live in the [testing] module.

pub mod builder;
pub mod config;
pub mod error;
pub mod formats;
pub mod hierarchy;
pub mod lexing;
pub mod locator;
pub mod metadata;
pub mod parsing;
pub mod registry;
pub mod testing;

pub use builder::{BuilderFlag, BuilderFlags, LocatorBuilder};
pub use error::{HierarchyError, LocatorError, MetadataError, RegistryError};
pub use hierarchy::{Book, Canon, Chapters, HierarchyProvider};
pub use locator::{Granularity, Locator};
pub use parsing::{parse, parse_with};
pub use registry::Registry;
