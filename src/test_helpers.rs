//! Shared test doubles: a scripted transport and response builders.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::AdminError;
use crate::net::api::ResourceApi;
use crate::net::fetch::{FetchClient, RetryPolicy};
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::record::Record;

// =========================================================================
// MockTransport
// =========================================================================

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, AdminError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, AdminError>>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AdminError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdminError::Network("no scripted response".into())))
    }
}

pub fn json_response(status: u16, body: &Value) -> Result<HttpResponse, AdminError> {
    Ok(HttpResponse {
        status,
        content_type: Some("application/json; charset=utf-8".into()),
        body: body.to_string(),
    })
}

pub fn raw_response(status: u16, content_type: &str, body: &str) -> Result<HttpResponse, AdminError> {
    Ok(HttpResponse { status, content_type: Some(content_type.into()), body: body.into() })
}

/// API over `transport` with no retry delay, so tests never sleep.
pub fn api_over(transport: Arc<MockTransport>) -> ResourceApi {
    let fetch = FetchClient::new(transport).with_retry(RetryPolicy::once());
    ResourceApi::new(fetch)
}

pub fn record(value: Value) -> Record {
    Record::from_value(value).expect("test record must be a JSON object")
}
