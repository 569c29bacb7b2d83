//! Edit form over a fetched collection.
//!
//! DESIGN
//! ======
//! `UpdateState` is the whole lifecycle:
//!
//! ```text
//! NoSelection -> Selected -> Submitting -> NoSelection   (saved, navigated away)
//!                                       -> Selected      (rejected, error set)
//! ```
//!
//! Selecting a record copies it into a draft; edits touch only the draft,
//! so a failed submit leaves the original available for comparison.
//!
//! ERROR HANDLING
//! ==============
//! Bad selections and submits with nothing selected fail locally with
//! `AdminError::Validation` and never reach the network. Server failures
//! keep the draft and expose a display message through `error()`.

#[cfg(test)]
#[path = "update_test.rs"]
mod update_test;

use serde_json::Value;

use crate::catalog::DEFAULT_KEY_FIELD;
use crate::error::{AdminError, server_message};
use crate::fields::{FormField, SelectOption, coerce_input, options_from_records};
use crate::net::api::ResourceApi;
use crate::record::Record;
use crate::state::navigation::Navigator;

pub const UPDATE_FAILURE_MESSAGE: &str = "Failed to update record";

/// Called with the saved record after a successful submit.
pub type SuccessCallback = Box<dyn FnMut(&Record) + Send>;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UpdateState {
    #[default]
    NoSelection,
    Selected { original: Record, draft: Record },
    Submitting { original: Record, draft: Record },
}

pub struct UpdateForm {
    records: Vec<Record>,
    fields: Vec<FormField>,
    endpoint: String,
    key_field: String,
    redirect: Option<String>,
    on_success: Option<SuccessCallback>,
    state: UpdateState,
    error: Option<String>,
}

impl UpdateForm {
    #[must_use]
    pub fn new(records: Vec<Record>, fields: Vec<FormField>, endpoint: impl Into<String>) -> Self {
        Self {
            records,
            fields,
            endpoint: endpoint.into(),
            key_field: DEFAULT_KEY_FIELD.to_owned(),
            redirect: None,
            on_success: None,
            state: UpdateState::NoSelection,
            error: None,
        }
    }

    #[must_use]
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Navigate here after saving instead of the route derived from the
    /// endpoint.
    #[must_use]
    pub fn with_redirect(mut self, route: impl Into<String>) -> Self {
        self.redirect = Some(route.into());
        self
    }

    #[must_use]
    pub fn on_success(mut self, callback: SuccessCallback) -> Self {
        self.on_success = Some(callback);
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Replace the options of a select input, e.g. after fetching countries.
    pub fn set_options(&mut self, name: &str, options: Vec<SelectOption>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
            field.options = options;
        }
    }

    #[must_use]
    pub fn update_endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn redirect_route(&self) -> String {
        self.redirect.clone().unwrap_or_else(|| derive_redirect(&self.endpoint))
    }

    #[must_use]
    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Draft of the selected record, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&Record> {
        match &self.state {
            UpdateState::Selected { draft, .. } | UpdateState::Submitting { draft, .. } => Some(draft),
            UpdateState::NoSelection => None,
        }
    }

    /// Selection dropdown entries.
    #[must_use]
    pub fn options(&self) -> Vec<SelectOption> {
        options_from_records(&self.records, &self.key_field)
    }

    /// Select the record whose key equals `raw_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] when `raw_id` is not an integer or
    /// matches no record. The form is reset to `NoSelection` in that case.
    pub fn select(&mut self, raw_id: &str) -> Result<(), AdminError> {
        let found = raw_id
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| self.records.iter().find(|record| record.key_int(&self.key_field) == Some(id)));

        let Some(record) = found else {
            let message = format!("no record with {} {}", self.key_field, raw_id.trim());
            self.state = UpdateState::NoSelection;
            self.error = Some(message.clone());
            return Err(AdminError::Validation(message));
        };

        self.state = UpdateState::Selected { original: record.clone(), draft: record.clone() };
        self.error = None;
        Ok(())
    }

    /// Set a draft field from raw input, typed by its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] unless a record is selected.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), AdminError> {
        let value = coerce_input(&self.fields, name, raw);
        self.set_value(name, value)
    }

    /// Set a draft field to an already-typed value.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] unless a record is selected.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), AdminError> {
        match &mut self.state {
            UpdateState::Selected { draft, .. } => {
                draft.set(name, value);
                Ok(())
            }
            _ => Err(AdminError::Validation("no record selected".into())),
        }
    }

    /// `PUT {endpoint}/{id}` with the draft, then navigate to
    /// [`UpdateForm::redirect_route`].
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] with nothing selected, or the API
    /// error. On API failure the form returns to `Selected` with `error()`
    /// set.
    pub async fn submit(&mut self, api: &ResourceApi, navigator: &dyn Navigator) -> Result<Record, AdminError> {
        let (original, draft) = match std::mem::take(&mut self.state) {
            UpdateState::Selected { original, draft } => (original, draft),
            other => {
                self.state = other;
                return Err(AdminError::Validation("no record selected".into()));
            }
        };
        let Some(id) = original.key_text(&self.key_field) else {
            self.state = UpdateState::Selected { original, draft };
            return Err(AdminError::Validation(format!("selected record has no {}", self.key_field)));
        };

        self.state = UpdateState::Submitting { original: original.clone(), draft: draft.clone() };
        self.error = None;

        match api.update(&self.endpoint, &id, &draft).await {
            Ok(saved) => {
                let saved = if saved.is_empty() { draft } else { saved };
                navigator.navigate(&self.redirect_route(), false);
                if let Some(callback) = self.on_success.as_mut() {
                    callback(&saved);
                }
                self.state = UpdateState::NoSelection;
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, %id, error = %e, "update rejected");
                self.error = Some(failure_message(&e));
                self.state = UpdateState::Selected { original, draft };
                Err(e)
            }
        }
    }
}

fn failure_message(error: &AdminError) -> String {
    let from_server = match error {
        AdminError::Status { body, .. } => server_message(body),
        _ => None,
    };
    from_server.unwrap_or_else(|| UPDATE_FAILURE_MESSAGE.to_owned())
}

/// Admin route for an update endpoint: drop a leading `api` and a trailing
/// `update` segment, then prefix `/admin`.
#[must_use]
pub fn derive_redirect(endpoint: &str) -> String {
    let mut segments: Vec<&str> = endpoint.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() == Some(&"api") {
        segments.remove(0);
    }
    if segments.last() == Some(&"update") {
        segments.pop();
    }
    segments.iter().fold(String::from("/admin"), |mut route, segment| {
        route.push('/');
        route.push_str(segment);
        route
    })
}
