//! Sorting passages by metadata
//!
//! Comparisons return `Result` instead of panicking on bad data: a passage without the key, or
//! two values of different types, is reported as a [`MetadataError`] and the caller decides
//! whether it is fatal.

use super::Passage;
use crate::error::MetadataError;
use std::cmp::Ordering;

/// Sort by the locators' reading order.
pub const KEY_REFERENCE_CANONICAL: &str = "KEY_REF_CANONICAL";
/// Sort by the locators' rendered text.
pub const KEY_REFERENCE_ALPHABETICAL: &str = "KEY_REFERENCE_ALPHABETICAL";

pub trait PassageComparator {
    fn compare(&self, a: &Passage, b: &Passage) -> Result<Ordering, MetadataError>;
}

/// Orders passages by the value stored under one metadata key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataComparator {
    key: String,
}

impl MetadataComparator {
    pub fn new(key: impl Into<String>) -> Self {
        MetadataComparator { key: key.into() }
    }

    pub fn canonical() -> Self {
        Self::new(KEY_REFERENCE_CANONICAL)
    }

    pub fn alphabetical() -> Self {
        Self::new(KEY_REFERENCE_ALPHABETICAL)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PassageComparator for MetadataComparator {
    fn compare(&self, a: &Passage, b: &Passage) -> Result<Ordering, MetadataError> {
        match self.key.as_str() {
            KEY_REFERENCE_CANONICAL => Ok(a.locator().cmp(b.locator())),
            KEY_REFERENCE_ALPHABETICAL => Ok(a
                .locator()
                .to_string()
                .cmp(&b.locator().to_string())),
            key => {
                let (Some(lhs), Some(rhs)) = (a.metadata().get(key), b.metadata().get(key)) else {
                    return Err(MetadataError::MissingKey(key.to_string()));
                };
                lhs.partial_compare(rhs)
                    .ok_or_else(|| MetadataError::NotComparable {
                        key: key.to_string(),
                        reason: if lhs.type_name() == rhs.type_name() {
                            format!("{} values are unordered", lhs.type_name())
                        } else {
                            format!("{} and {} differ in type", lhs.type_name(), rhs.type_name())
                        },
                    })
            }
        }
    }
}

/// Chains several comparators, falling back to reading order when all of them tie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiComparator {
    criteria: Vec<MetadataComparator>,
}

impl MultiComparator {
    pub fn new(criteria: Vec<MetadataComparator>) -> Self {
        MultiComparator { criteria }
    }

    pub fn then(mut self, comparator: MetadataComparator) -> Self {
        self.criteria.push(comparator);
        self
    }

    pub fn criteria(&self) -> &[MetadataComparator] {
        &self.criteria
    }
}

impl PassageComparator for MultiComparator {
    fn compare(&self, a: &Passage, b: &Passage) -> Result<Ordering, MetadataError> {
        for criterion in &self.criteria {
            let ordering = criterion.compare(a, b)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(a.locator().cmp(b.locator()))
    }
}

/// Sort `passages` in place.
///
/// Every passage is first compared against the first one, so missing keys and mixed types are
/// reported before anything moves. On error the slice is left untouched.
pub fn sort_passages<C>(passages: &mut [Passage], comparator: &C) -> Result<(), MetadataError>
where
    C: PassageComparator + ?Sized,
{
    if let Some((first, rest)) = passages.split_first() {
        for passage in rest {
            comparator.compare(first, passage)?;
        }
    }

    passages.sort_by(|a, b| comparator.compare(a, b).unwrap_or(Ordering::Equal));
    Ok(())
}
