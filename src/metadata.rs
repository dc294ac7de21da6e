//! Typed metadata attached to passages
//!
//! [`Metadata`] maps string keys to a closed set of comparable value types. Values go in through
//! typed setters and come back out through typed getters; asking for a value under the wrong
//! type is an error rather than a silent conversion. A missing key yields the getter's default.
//!
//! Passages can be sorted by any metadata key, see [`comparator`].

pub mod comparator;

pub use comparator::{
    sort_passages, MetadataComparator, MultiComparator, PassageComparator,
    KEY_REFERENCE_ALPHABETICAL, KEY_REFERENCE_CANONICAL,
};

use crate::error::MetadataError;
use crate::locator::Locator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum MetaValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl MetaValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            MetaValue::Byte(_) => "byte",
            MetaValue::Short(_) => "short",
            MetaValue::Int(_) => "int",
            MetaValue::Long(_) => "long",
            MetaValue::Float(_) => "float",
            MetaValue::Double(_) => "double",
            MetaValue::Bool(_) => "bool",
            MetaValue::Char(_) => "char",
            MetaValue::Str(_) => "string",
        }
    }

    /// Compare two values of the same type. `None` for different types or NaN.
    pub fn partial_compare(&self, other: &MetaValue) -> Option<Ordering> {
        match (self, other) {
            (MetaValue::Byte(a), MetaValue::Byte(b)) => Some(a.cmp(b)),
            (MetaValue::Short(a), MetaValue::Short(b)) => Some(a.cmp(b)),
            (MetaValue::Int(a), MetaValue::Int(b)) => Some(a.cmp(b)),
            (MetaValue::Long(a), MetaValue::Long(b)) => Some(a.cmp(b)),
            (MetaValue::Float(a), MetaValue::Float(b)) => a.partial_cmp(b),
            (MetaValue::Double(a), MetaValue::Double(b)) => a.partial_cmp(b),
            (MetaValue::Bool(a), MetaValue::Bool(b)) => Some(a.cmp(b)),
            (MetaValue::Char(a), MetaValue::Char(b)) => Some(a.cmp(b)),
            (MetaValue::Str(a), MetaValue::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A Rust type that can be stored as a [`MetaValue`].
pub trait MetaType: Sized {
    const TYPE_NAME: &'static str;

    fn into_value(self) -> MetaValue;

    fn from_value(value: &MetaValue) -> Option<Self>;
}

macro_rules! meta_type {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl MetaType for $ty {
            const TYPE_NAME: &'static str = $name;

            fn into_value(self) -> MetaValue {
                MetaValue::$variant(self)
            }

            #[allow(clippy::clone_on_copy)]
            fn from_value(value: &MetaValue) -> Option<Self> {
                match value {
                    MetaValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

meta_type!(i8, Byte, "byte");
meta_type!(i16, Short, "short");
meta_type!(i32, Int, "int");
meta_type!(i64, Long, "long");
meta_type!(f32, Float, "float");
meta_type!(f64, Double, "double");
meta_type!(bool, Bool, "bool");
meta_type!(char, Char, "char");
meta_type!(String, Str, "string");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    items: BTreeMap<String, MetaValue>,
}

macro_rules! typed_accessors {
    ($($put:ident, $get:ident, $get_or:ident => $ty:ty),* $(,)?) => {
        $(
            pub fn $put(&mut self, key: impl Into<String>, value: $ty) -> &mut Self {
                self.put(key, value)
            }

            /// The value at `key`, or the type's default when the key is missing.
            pub fn $get(&self, key: &str) -> Result<$ty, MetadataError> {
                self.$get_or(key, <$ty>::default())
            }

            pub fn $get_or(&self, key: &str, default: $ty) -> Result<$ty, MetadataError> {
                Ok(self.typed_get::<$ty>(key)?.unwrap_or(default))
            }
        )*
    };
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<T: MetaType>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        self.items.insert(key.into(), value.into_value());
        self
    }

    pub fn put_value(&mut self, key: impl Into<String>, value: MetaValue) -> &mut Self {
        self.items.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.items.get(key)
    }

    /// The value at `key` as `T`. `Ok(None)` when missing, `Err` when stored under another type.
    pub fn typed_get<T: MetaType>(&self, key: &str) -> Result<Option<T>, MetadataError> {
        let Some(value) = self.items.get(key) else {
            return Ok(None);
        };
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| MetadataError::TypeMismatch {
                key: key.to_string(),
                expected: T::TYPE_NAME,
                found: value.type_name(),
            })
    }

    typed_accessors! {
        put_byte, get_byte, get_byte_or => i8,
        put_short, get_short, get_short_or => i16,
        put_int, get_int, get_int_or => i32,
        put_long, get_long, get_long_or => i64,
        put_float, get_float, get_float_or => f32,
        put_double, get_double, get_double_or => f64,
        put_bool, get_bool, get_bool_or => bool,
        put_char, get_char, get_char_or => char,
        put_string, get_string, get_string_or => String,
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Type name of the value at `key`.
    pub fn value_type(&self, key: &str) -> Option<&'static str> {
        self.items.get(key).map(MetaValue::type_name)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.items.remove(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

/// A located passage with optional text and sortable metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    locator: Locator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    metadata: Metadata,
}

impl Passage {
    pub fn new(locator: Locator) -> Self {
        Passage {
            locator,
            text: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metadata {
        let mut m = Metadata::new();
        m.put_byte("BYTE", 1)
            .put_short("SHORT", 2)
            .put_int("INT", 3)
            .put_long("LONG", 4)
            .put_float("FLOAT", 5.0)
            .put_double("DOUBLE", 6.0)
            .put_bool("BOOLEAN", true)
            .put_char("CHAR", 'q')
            .put_string("STRING", "versicle".to_string());
        m
    }

    #[test]
    fn test_values_come_back_typed() {
        let m = sample();
        assert_eq!(m.get_byte("BYTE"), Ok(1));
        assert_eq!(m.get_short("SHORT"), Ok(2));
        assert_eq!(m.get_int("INT"), Ok(3));
        assert_eq!(m.get_long("LONG"), Ok(4));
        assert_eq!(m.get_float("FLOAT"), Ok(5.0));
        assert_eq!(m.get_double("DOUBLE"), Ok(6.0));
        assert_eq!(m.get_bool("BOOLEAN"), Ok(true));
        assert_eq!(m.get_char("CHAR"), Ok('q'));
        assert_eq!(m.get_string("STRING"), Ok("versicle".to_string()));
    }

    #[test]
    fn test_bookkeeping() {
        let m = sample();
        assert_eq!(m.len(), 9);
        assert!(m.contains_key("STRING"));
        assert_eq!(m.value_type("STRING"), Some("string"));
        assert_eq!(m.value_type("missing"), None);
        assert!(m.keys().any(|key| key == "CHAR"));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let m = sample();
        assert_eq!(m.get_int("missing"), Ok(0));
        assert_eq!(m.get_char("missing"), Ok('\0'));
        assert_eq!(m.get_string("missing"), Ok(String::new()));
        assert_eq!(m.get_bool_or("missing", true), Ok(true));
        assert_eq!(m.get_double_or("missing", 6.0), Ok(6.0));
        assert_eq!(m.typed_get::<i32>("missing"), Ok(None));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let m = sample();
        let err = m.typed_get::<i32>("STRING").unwrap_err();
        assert_eq!(
            err,
            MetadataError::TypeMismatch {
                key: "STRING".to_string(),
                expected: "int",
                found: "string",
            }
        );
        assert!(m.get_long("INT").is_err());
    }

    #[test]
    fn test_overwrite_changes_type() {
        let mut m = sample();
        m.put_string("INT", "three".to_string());
        assert_eq!(m.value_type("INT"), Some("string"));
        assert_eq!(m.len(), 9);
    }

    #[test]
    fn test_partial_compare() {
        assert_eq!(
            MetaValue::Int(1).partial_compare(&MetaValue::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(MetaValue::Int(1).partial_compare(&MetaValue::Long(2)), None);
        assert_eq!(
            MetaValue::Double(f64::NAN).partial_compare(&MetaValue::Double(1.0)),
            None
        );
    }
}
