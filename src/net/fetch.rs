//! Retrying JSON fetch client.
//!
//! DESIGN
//! ======
//! Attempts run strictly one after another; a failed attempt sleeps the
//! policy delay before the next one, and the final failure is returned to
//! the caller unchanged. Fixed delay is the default. Exponential backoff is
//! opt-in through [`Backoff::Exponential`].
//!
//! PARSING
//! =======
//! Bodies are read as text first and only parsed when the response
//! advertises a JSON content type. A body that claims JSON but fails to parse
//! is returned as [`Payload::Text`] instead of failing the attempt. A falsy
//! payload (`null`, `false`, `0`, `""`) counts as a failed attempt unless
//! the caller opts in with [`FetchOptions::allow_empty`].

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::AdminError;

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

// =============================================================================
// RETRY POLICY
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay between every attempt.
    #[default]
    Fixed,
    /// Delay doubles after each failed attempt.
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below 1.
    pub attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts: attempts.max(1), delay, backoff: Backoff::Fixed }
    }

    /// A single attempt with no retry.
    #[must_use]
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay to wait after the `failed`-th failed attempt (1-based).
    #[must_use]
    pub fn delay_for(&self, failed: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 1_u32.checked_shl(failed.saturating_sub(1)).unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// A successfully fetched response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Mirrors the falsy values a JSON consumer would treat as "no data".
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Json(Value::Null | Value::Bool(false)) => true,
            Self::Json(Value::Number(n)) => n.as_f64() == Some(0.0),
            Self::Json(Value::String(s)) | Self::Text(s) => s.is_empty(),
            Self::Json(_) => false,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Turn a raw response into a payload, applying the status check and the
/// permissive JSON parse.
///
/// # Errors
///
/// Returns [`AdminError::Status`] for non-2xx responses and
/// [`AdminError::EmptyPayload`] for falsy bodies unless `allow_empty` is set.
pub fn parse_response(response: HttpResponse, allow_empty: bool) -> Result<Payload, AdminError> {
    if !response.is_success() {
        return Err(AdminError::Status { status: response.status, body: response.body });
    }

    let advertises_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

    let payload = if advertises_json {
        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => Payload::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, "JSON content type with unparseable body; using raw text");
                Payload::Text(response.body)
            }
        }
    } else {
        Payload::Text(response.body)
    };

    if payload.is_falsy() && !allow_empty {
        return Err(AdminError::EmptyPayload);
    }
    Ok(payload)
}

/// Ensure a relative path starts with `/`. Absolute URLs pass through.
#[must_use]
pub fn normalize_path(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/') {
        url.to_owned()
    } else {
        format!("/{url}")
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Overrides the client's default policy when set.
    pub retry: Option<RetryPolicy>,
    /// Accept falsy payloads (e.g. `204 No Content`) as success.
    pub allow_empty: bool,
}

impl FetchOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, headers: Vec::new(), body: None, retry: None, allow_empty: false }
    }

    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Retrying fetch over any [`Transport`].
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl FetchClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, retry: RetryPolicy::default() }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch `url`, retrying failed attempts per the effective policy.
    ///
    /// # Errors
    ///
    /// Returns the error from the final attempt once all attempts fail.
    pub async fn fetch_json(&self, url: &str, options: FetchOptions) -> Result<Payload, AdminError> {
        let policy = options.retry.unwrap_or(self.retry);
        let allow_empty = options.allow_empty;
        let request = HttpRequest {
            method: options.method,
            path: normalize_path(url),
            headers: options.headers,
            body: options.body,
        };

        let mut attempt = 1;
        loop {
            let outcome = match self.transport.send(request.clone()).await {
                Ok(response) => parse_response(response, allow_empty),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(payload) => return Ok(payload),
                Err(e) if attempt >= policy.attempts => {
                    tracing::warn!(
                        method = request.method.as_str(),
                        path = %request.path,
                        attempts = attempt,
                        error = %e,
                        "fetch failed"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let delay = policy.delay_for(attempt);
                    tracing::debug!(
                        method = request.method.as_str(),
                        path = %request.path,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "fetch attempt failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Fetch and decode a JSON payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns fetch errors, or [`AdminError::Decode`] when the payload is
    /// text or does not match `T`.
    pub async fn fetch_as<T: DeserializeOwned>(&self, url: &str, options: FetchOptions) -> Result<T, AdminError> {
        match self.fetch_json(url, options).await? {
            Payload::Json(value) => serde_json::from_value(value).map_err(|e| AdminError::Decode(e.to_string())),
            Payload::Text(_) => Err(AdminError::Decode(format!("expected JSON from {url}, got text"))),
        }
    }
}
