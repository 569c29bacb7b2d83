//! Admin client error taxonomy.
//!
//! DESIGN
//! ======
//! One enum covers every failure surfaced to callers. Transport failures
//! (`Network`, `Status`) are retried by the fetch client; validation gaps are
//! raised locally before any request is made. Malformed JSON bodies are not
//! errors at all: the fetch client degrades them to raw text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Fallback text shown when a server rejection carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Errors produced by admin client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    /// The request never produced an HTTP response.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose parsed payload was empty or falsy.
    #[error("empty response payload")]
    EmptyPayload,

    /// A payload could not be decoded into the requested type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A local precondition failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// A configuration value was missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl AdminError {
    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::EmptyPayload | Self::Status { status: 429 | 500..=599, .. }
        )
    }

    /// HTTP status for server-side failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a user-facing notice.
    ///
    /// Server rejections prefer the `message` or `error` field of a JSON body;
    /// everything else uses the display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { body, .. } => server_message(body).unwrap_or_else(|| {
                if body.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_owned()
                } else {
                    self.to_string()
                }
            }),
            other => other.to_string(),
        }
    }
}

/// Extract a `message`/`error` string from a JSON error body.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|msg| !msg.trim().is_empty())
        .map(ToOwned::to_owned)
}
