//! HTTP transport abstraction.
//!
//! DESIGN
//! ======
//! `Transport` sends exactly one request and reports what came back. It does
//! not interpret status codes or bodies; that is the fetch client's job. A
//! trait seam here lets view-models be exercised against an in-memory mock.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::AdminConfig;
use crate::error::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outgoing request. `path` is either absolute (`http://...`) or rooted
/// at the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), body: None }
    }
}

/// Raw response as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Network`] when no response was received.
    /// Non-2xx responses are returned as `Ok`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AdminError>;
}

// =============================================================================
// REQWEST
// =============================================================================

/// Production transport backed by `reqwest`.
///
/// Credentials ride along on every request. A configured session token is
/// seeded into the cookie jar, so cookies the server sets later are sent
/// alongside it.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`AdminError::HttpClientBuild`] if the client cannot be built
    /// or a session token is given with an unparseable base URL.
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        Self::build(&config.base_url, config.session_token.as_deref(), config.request_timeout)
    }

    /// # Errors
    ///
    /// See [`ReqwestTransport::new`].
    pub fn build(
        base_url: &str,
        session_token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, AdminError> {
        let base_url = base_url.trim_end_matches('/');
        let jar = Arc::new(Jar::default());
        if let Some(token) = session_token {
            let url = base_url
                .parse::<reqwest::Url>()
                .map_err(|e| AdminError::HttpClientBuild(format!("invalid base URL {base_url}: {e}")))?;
            jar.add_cookie_str(&format!("session_token={token}; Path=/"), &url);
        }

        let mut builder = reqwest::Client::builder().cookie_provider(jar);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AdminError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: base_url.to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AdminError> {
        let url = self.url_for(&request.path);
        let mut builder = self.http.request(request.method.to_reqwest(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response
            .text()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        tracing::trace!(method = request.method.as_str(), %url, status, "transport response");
        Ok(HttpResponse { status, content_type, body })
    }
}
