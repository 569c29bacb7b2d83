//! Dot-path field resolution over JSON records.
//!
//! A path like `country.name` is parsed once into segments and then walked
//! against each record. Every step either finds a value or yields
//! [`Resolved::Absent`]; nothing along the walk can fail.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::fmt;

use serde_json::{Map, Value};

/// Keys read from array elements when an array is flattened to text.
pub const ARRAY_TEXT_KEYS: [&str; 2] = ["name", "type_name"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Text form of the resolved value, see [`text_of`].
    #[must_use]
    pub fn text(self) -> Option<String> {
        self.value().and_then(text_of)
    }
}

/// A parsed dot-separated field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self { raw: raw.to_owned(), segments }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Walk the path through nested objects. Numeric segments index into
    /// arrays. `null` anywhere along the way counts as absent.
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a Map<String, Value>) -> Resolved<'a> {
        let Some((first, rest)) = self.segments.split_first() else {
            return Resolved::Absent;
        };
        let Some(mut current) = record.get(first) else {
            return Resolved::Absent;
        };

        for segment in rest {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Resolved::Absent,
            }
        }

        if current.is_null() { Resolved::Absent } else { Resolved::Present(current) }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Render a JSON value as display/search text.
///
/// Scalars render directly. Arrays flatten to the comma-joined `name` or
/// `type_name` of each element (bare strings are kept as-is). Objects render
/// as their own `name`/`type_name`. Anything else has no text form.
#[must_use]
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(element_text).collect();
            if parts.is_empty() { None } else { Some(parts.join(", ")) }
        }
        Value::Object(map) => named_text(map),
        Value::Null => None,
    }
}

fn element_text(item: &Value) -> Option<String> {
    match item {
        Value::Object(map) => named_text(map),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn named_text(map: &Map<String, Value>) -> Option<String> {
    ARRAY_TEXT_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(ToOwned::to_owned)
}
