//! Catalog records and structural field access.
//!
//! DESIGN
//! ======
//! A [`Record`] is the untyped JSON object the API returns. View-models read
//! it only through [`FieldPath`], which resolves to present/absent instead of
//! erroring, so a malformed record renders as `N/A` rather than failing the
//! whole table. Typed views live in [`model`].

pub mod model;
pub mod path;


use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use path::{FieldPath, Resolved, text_of};

/// Fields tried, in order, when a record needs a human-readable label.
pub const LABEL_FIELDS: [&str; 4] = ["name", "title", "type_name", "username"];

/// One catalog entity as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; returns `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn resolve(&self, path: &FieldPath) -> Resolved<'_> {
        path.resolve(&self.0)
    }

    /// The key field as text (numbers and strings only).
    #[must_use]
    pub fn key_text(&self, key_field: &str) -> Option<String> {
        match self.0.get(key_field)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// The key field as an integer, accepting numeric strings.
    #[must_use]
    pub fn key_int(&self, key_field: &str) -> Option<i64> {
        match self.0.get(key_field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// First non-empty value among [`LABEL_FIELDS`].
    #[must_use]
    pub fn label(&self) -> Option<String> {
        LABEL_FIELDS
            .iter()
            .filter_map(|field| self.0.get(*field).and_then(text_of))
            .find(|text| !text.is_empty())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
