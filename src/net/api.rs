//! Resource endpoints on top of the fetch client.
//!
//! ERROR HANDLING
//! ==============
//! Reads use the fetch client's default retry policy. Mutations run under
//! `mutation_retry`, a single attempt unless configured otherwise, so a
//! create is never silently replayed. Every call returns `Result`; turning
//! failures into notices is left to the caller.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde_json::Value;

use super::fetch::{FetchClient, FetchOptions, Payload, RetryPolicy};
use super::transport::{Method, ReqwestTransport};
use crate::catalog::ResourceKind;
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::record::Record;

#[derive(Clone)]
pub struct ResourceApi {
    fetch: FetchClient,
    mutation_retry: RetryPolicy,
}

impl ResourceApi {
    #[must_use]
    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch, mutation_retry: RetryPolicy::once() }
    }

    /// Build the production stack: reqwest transport, configured retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AdminError> {
        let transport = ReqwestTransport::new(config)?;
        let fetch = FetchClient::new(Arc::new(transport)).with_retry(config.fetch_retry);
        Ok(Self::new(fetch).with_mutation_retry(config.mutation_retry))
    }

    #[must_use]
    pub fn with_mutation_retry(mut self, retry: RetryPolicy) -> Self {
        self.mutation_retry = retry;
        self
    }

    #[must_use]
    pub fn fetch(&self) -> &FetchClient {
        &self.fetch
    }

    /// `GET /api/{segment}`.
    ///
    /// # Errors
    ///
    /// Returns fetch errors, or [`AdminError::Decode`] when the payload holds
    /// no recognizable list.
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<Record>, AdminError> {
        self.list_in(kind.segment()).await
    }

    /// `GET /api/{segment}` for an arbitrary segment.
    ///
    /// # Errors
    ///
    /// See [`ResourceApi::list`].
    pub async fn list_in(&self, segment: &str) -> Result<Vec<Record>, AdminError> {
        let payload = self.fetch.fetch_json(&format!("/api/{segment}"), FetchOptions::get()).await?;
        records_from(payload, segment)
    }

    /// `GET /api/{segment}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns fetch errors, or [`AdminError::Decode`] for a non-object body.
    pub async fn get(&self, kind: ResourceKind, id: &str) -> Result<Record, AdminError> {
        let path = format!("{}/{id}", kind.collection_path());
        match self.fetch.fetch_json(&path, FetchOptions::get()).await? {
            Payload::Json(value) => {
                unwrap_single(value, kind).ok_or_else(|| AdminError::Decode(format!("{path} did not return an object")))
            }
            Payload::Text(_) => Err(AdminError::Decode(format!("{path} returned text"))),
        }
    }

    /// `POST /api/{segment}/add`.
    ///
    /// # Errors
    ///
    /// Returns the fetch error from the final attempt.
    pub async fn create(&self, kind: ResourceKind, record: &Record) -> Result<Record, AdminError> {
        let path = format!("{}/add", kind.collection_path());
        self.mutate(Method::Post, &path, Some(record)).await
    }

    /// `PUT {endpoint}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the fetch error from the final attempt.
    pub async fn update(&self, endpoint: &str, id: &str, record: &Record) -> Result<Record, AdminError> {
        let path = format!("{}/{id}", endpoint.trim_end_matches('/'));
        self.mutate(Method::Put, &path, Some(record)).await
    }

    /// `DELETE /api/{segment}/delete/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the fetch error from the final attempt.
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), AdminError> {
        self.delete_in(kind.segment(), id).await
    }

    /// `DELETE /api/{segment}/delete/{id}` for an arbitrary segment.
    ///
    /// # Errors
    ///
    /// See [`ResourceApi::delete`].
    pub async fn delete_in(&self, segment: &str, id: &str) -> Result<(), AdminError> {
        let path = format!("/api/{segment}/delete/{id}");
        self.mutate(Method::Delete, &path, None).await.map(|_| ())
    }

    async fn mutate(&self, method: Method, path: &str, body: Option<&Record>) -> Result<Record, AdminError> {
        let mut options = FetchOptions::new(method).with_retry(self.mutation_retry).allow_empty();
        if let Some(record) = body {
            options = options.with_body(record.clone().into_value());
        }
        let payload = self.fetch.fetch_json(path, options).await?;
        tracing::info!(method = method.as_str(), %path, "mutation accepted");
        Ok(match payload {
            Payload::Json(Value::Object(map)) => Record::from_map(map),
            _ => Record::new(),
        })
    }
}

/// Pull the record list out of a list payload.
///
/// Accepts a bare array, or an object holding the array under `data` or the
/// resource segment, whichever is first to hold an array. Non-object entries
/// are skipped.
///
/// # Errors
///
/// Returns [`AdminError::Decode`] when no array is found.
pub fn records_from(payload: Payload, segment: &str) -> Result<Vec<Record>, AdminError> {
    let Payload::Json(value) = payload else {
        return Err(AdminError::Decode(format!("/api/{segment} returned text")));
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = ["data", segment]
                .into_iter()
                .find(|key| matches!(map.get(*key), Some(Value::Array(_))));
            match key.and_then(|key| map.remove(key)) {
                Some(Value::Array(items)) => items,
                _ => return Err(AdminError::Decode(format!("/api/{segment} returned no list"))),
            }
        }
        _ => return Err(AdminError::Decode(format!("/api/{segment} returned no list"))),
    };

    Ok(items.into_iter().filter_map(Record::from_value).collect())
}

fn unwrap_single(value: Value, kind: ResourceKind) -> Option<Record> {
    let Value::Object(mut map) = value else {
        return None;
    };
    for wrapper in ["data", kind.singular()] {
        if matches!(map.get(wrapper), Some(Value::Object(_))) {
            if let Some(Value::Object(inner)) = map.remove(wrapper) {
                return Some(Record::from_map(inner));
            }
        }
    }
    Some(Record::from_map(map))
}
