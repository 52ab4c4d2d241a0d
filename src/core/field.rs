//! Field value types and field-name validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;
use uuid::Uuid;

/// Longest field name the resolver will look at (PostgreSQL identifier limit)
pub const MAX_FIELD_NAME_LENGTH: usize = 63;

/// A polymorphic field value that can hold different types
///
/// Sortable records expose their fields as `FieldValue`s so that the
/// in-memory source can order any record type by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
            FieldValue::DateTime(_) => 5,
        }
    }

    /// Total ordering used when sorting records by a field
    ///
    /// `Null` sorts before everything else. Integers and floats compare
    /// numerically with each other; floats use IEEE total ordering so `NaN`
    /// never breaks the sort. Values of unrelated variants compare by variant.
    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        // Out-of-range counts saturate; they still sort after every smaller value.
        FieldValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Check that a string has the shape of a plain field name
///
/// A plain field name starts with an ASCII letter or underscore, continues
/// with ASCII letters, digits or underscores, and is at most
/// [`MAX_FIELD_NAME_LENGTH`] characters long. Anything else (dots, brackets,
/// parentheses, quotes, whitespace, operators, non-ASCII) is rejected.
pub fn is_plain_field_name(name: &str) -> bool {
    static FIELD_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = FIELD_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid")
    });
    name.len() <= MAX_FIELD_NAME_LENGTH && regex.is_match(name)
}
