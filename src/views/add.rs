//! Create form for any resource.

#[cfg(test)]
#[path = "add_test.rs"]
mod add_test;

use std::future::Future;

use serde_json::Value;

use crate::catalog::ResourceKind;
use crate::error::AdminError;
use crate::fields::{FormField, SelectOption, coerce_input};
use crate::net::api::ResourceApi;
use crate::record::Record;

#[derive(Debug, Clone)]
pub struct AddForm {
    title: String,
    kind: Option<ResourceKind>,
    fields: Vec<FormField>,
    draft: Record,
}

impl AddForm {
    /// Form for the resource named by `title`, singular or plural, any case.
    /// Unknown titles get no fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let kind = ResourceKind::from_title(&title);
        let fields = kind.map(ResourceKind::form_fields).unwrap_or_default();
        Self { title, kind, fields, draft: Record::new() }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> Option<ResourceKind> {
        self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn set_options(&mut self, name: &str, options: Vec<SelectOption>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
            field.options = options;
        }
    }

    #[must_use]
    pub fn draft(&self) -> &Record {
        &self.draft
    }

    pub fn set_field(&mut self, name: &str, raw: &str) {
        let value = coerce_input(&self.fields, name, raw);
        self.draft.set(name, value);
    }

    pub fn set_value(&mut self, name: &str, value: Value) {
        self.draft.set(name, value);
    }

    /// Hand the draft to `create` and start over with an empty draft,
    /// whatever `create` returns.
    ///
    /// # Errors
    ///
    /// Returns whatever `create` returns.
    pub async fn submit<F, Fut, T>(&mut self, create: F) -> Result<T, AdminError>
    where
        F: FnOnce(Record) -> Fut,
        Fut: Future<Output = Result<T, AdminError>>,
    {
        let draft = std::mem::take(&mut self.draft);
        create(draft).await
    }

    /// Submit through `POST /api/{segment}/add`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] when the title names no known
    /// resource, or the API error.
    pub async fn submit_to(&mut self, api: &ResourceApi) -> Result<Record, AdminError> {
        let Some(kind) = self.kind else {
            self.draft.clear();
            return Err(AdminError::Validation(format!("unknown resource: {}", self.title)));
        };
        self.submit(|draft| async move { api.create(kind, &draft).await }).await
    }
}
