//! Searchable record table.
//!
//! DESIGN
//! ======
//! The view holds the fetched collection and its column configuration.
//! `filter` and `rows` are pure reads recomputed on every call; there is no
//! cached filter result to invalidate. Deleting a record talks to the
//! server but leaves the held collection untouched, so callers re-fetch
//! when they want the table to reflect the delete.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use crate::catalog::DEFAULT_KEY_FIELD;
use crate::error::AdminError;
use crate::fields::DisplayField;
use crate::net::api::ResourceApi;
use crate::record::{FieldPath, Record, text_of};

/// Cell text when a column has no value for a record.
pub const MISSING_CELL: &str = "N/A";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ListView {
    title: String,
    records: Vec<Record>,
    search_fields: Vec<FieldPath>,
    display_fields: Vec<DisplayField>,
    key_field: String,
}

impl ListView {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        records: Vec<Record>,
        search_fields: Vec<FieldPath>,
        display_fields: Vec<DisplayField>,
    ) -> Self {
        Self {
            title: title.into(),
            records,
            search_fields,
            display_fields,
            key_field: DEFAULT_KEY_FIELD.to_owned(),
        }
    }

    #[must_use]
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.display_fields.iter().map(|field| field.label.as_str()).collect()
    }

    /// Records where any search field contains `query`, ignoring case.
    /// A blank query matches everything; any other query is matched as
    /// typed, surrounding spaces included.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Record> {
        if query.trim().is_empty() {
            return self.records.iter().collect();
        }
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| self.matches(record, &needle))
            .collect()
    }

    fn matches(&self, record: &Record, needle: &str) -> bool {
        self.search_fields.iter().any(|path| {
            record
                .resolve(path)
                .text()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }

    /// Rows for the records passing `query`, cells in column order.
    #[must_use]
    pub fn rows(&self, query: &str) -> Vec<ListRow> {
        self.filter(query)
            .into_iter()
            .map(|record| ListRow {
                key: record.key_text(&self.key_field).unwrap_or_default(),
                cells: self.display_fields.iter().map(|field| cell(record, field)).collect(),
            })
            .collect()
    }

    /// `DELETE /api/{title lower-cased}/delete/{key}`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] if the record has no key, or the
    /// API error when the server refuses.
    pub async fn delete(&self, api: &ResourceApi, record: &Record) -> Result<(), AdminError> {
        let key = record
            .key_text(&self.key_field)
            .ok_or_else(|| AdminError::Validation(format!("record has no {}", self.key_field)))?;
        let segment = self.title.to_lowercase();
        api.delete_in(&segment, &key).await?;
        tracing::info!(%segment, %key, "record deleted");
        Ok(())
    }
}

/// Cell text: custom renderer, then dot-path, then the key taken literally.
#[must_use]
pub fn cell(record: &Record, field: &DisplayField) -> String {
    if let Some(render) = &field.render {
        return render(record);
    }
    record
        .resolve(&field.path())
        .text()
        .or_else(|| record.get(&field.key).and_then(text_of))
        .unwrap_or_else(|| MISSING_CELL.to_owned())
}
