//! Declarative field descriptors for list columns and form inputs.
//!
//! DESIGN
//! ======
//! Descriptors carry presentation only. No validation rules are attached;
//! the server remains the authority on what a valid record is. Input
//! coercion turns typed text into the JSON value the API expects.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::record::{FieldPath, Record};

/// Custom cell renderer for a display column.
pub type Renderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

// =============================================================================
// DISPLAY
// =============================================================================

/// One column of a list view.
#[derive(Clone)]
pub struct DisplayField {
    pub key: String,
    pub label: String,
    pub render: Option<Renderer>,
}

impl DisplayField {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into(), render: None }
    }

    #[must_use]
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    #[must_use]
    pub fn path(&self) -> FieldPath {
        FieldPath::parse(&self.key)
    }
}

impl fmt::Debug for DisplayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayField")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// =============================================================================
// FORM
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Select,
    Textarea,
    Number,
    Password,
}

impl FieldKind {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "select" => Some(Self::Select),
            "textarea" => Some(Self::Textarea),
            "number" => Some(Self::Number),
            "password" => Some(Self::Password),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Password => "password",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Build dropdown options from fetched records, labelled by
/// [`Record::label`]. Records without a key are skipped.
#[must_use]
pub fn options_from_records(records: &[Record], key_field: &str) -> Vec<SelectOption> {
    records
        .iter()
        .filter_map(|record| {
            let value = record.key_text(key_field)?;
            let label = record.label().unwrap_or_else(|| value.clone());
            Some(SelectOption { value, label })
        })
        .collect()
}

/// One input of an add/update form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<SelectOption>,
    pub placeholder: Option<String>,
}

impl FormField {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), label: label.into(), kind, options: Vec::new(), placeholder: None }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    #[must_use]
    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    #[must_use]
    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    #[must_use]
    pub fn select(name: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = options;
        field
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Convert raw input text into the JSON value stored in a draft.
    ///
    /// Numbers and select values that look numeric (ids) become JSON
    /// numbers; everything else stays a string.
    #[must_use]
    pub fn coerce(&self, raw: &str) -> Value {
        match self.kind {
            FieldKind::Number | FieldKind::Select => numeric_value(raw.trim()).unwrap_or_else(|| Value::String(raw.to_owned())),
            FieldKind::Text | FieldKind::Textarea | FieldKind::Password => Value::String(raw.to_owned()),
        }
    }
}

fn numeric_value(raw: &str) -> Option<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

/// Coerce `raw` for `name` using the matching descriptor, or keep it as a
/// string when no descriptor matches.
#[must_use]
pub fn coerce_input(fields: &[FormField], name: &str, raw: &str) -> Value {
    fields
        .iter()
        .find(|field| field.name == name)
        .map_or_else(|| Value::String(raw.to_owned()), |field| field.coerce(raw))
}
