//! Admin client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::AdminError;
use crate::net::fetch::{Backoff, RetryPolicy};

pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_FETCH_RETRIES: u32 = 3;
pub const DEFAULT_FETCH_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_MUTATION_RETRIES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub environment: Environment,
    pub base_url: String,
    pub session_token: Option<String>,
    pub fetch_retry: RetryPolicy,
    pub mutation_retry: RetryPolicy,
    pub request_timeout: Option<Duration>,
}

impl AdminConfig {
    /// Build typed admin config from environment variables.
    ///
    /// Optional:
    /// - `CINEDESK_ENV`: `development` (default) or `production`
    /// - `CINEDESK_BASE_URL`: overrides environment-based selection
    /// - `CINEDESK_DEV_BASE_URL`: default `http://localhost:8000`
    /// - `CINEDESK_PROD_BASE_URL`: required in production without an override
    /// - `CINEDESK_SESSION_TOKEN`: sent as the `session_token` cookie
    /// - `CINEDESK_FETCH_RETRIES`: default 3
    /// - `CINEDESK_FETCH_RETRY_DELAY_MS`: default 1000
    /// - `CINEDESK_FETCH_BACKOFF`: `fixed` (default) or `exponential`
    /// - `CINEDESK_MUTATION_RETRIES`: default 1
    /// - `CINEDESK_REQUEST_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] for unknown enum values or a missing
    /// production base URL.
    pub fn from_env() -> Result<Self, AdminError> {
        let environment = parse_environment(std::env::var("CINEDESK_ENV").ok().as_deref())?;
        let base_url = match std::env::var("CINEDESK_BASE_URL") {
            Ok(url) => url,
            Err(_) => select_base_url(environment)?,
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        let session_token = std::env::var("CINEDESK_SESSION_TOKEN").ok().filter(|t| !t.is_empty());
        let backoff = parse_backoff(std::env::var("CINEDESK_FETCH_BACKOFF").ok().as_deref())?;
        let delay = Duration::from_millis(env_parse("CINEDESK_FETCH_RETRY_DELAY_MS", DEFAULT_FETCH_RETRY_DELAY_MS));

        let fetch_retry = RetryPolicy::new(env_parse("CINEDESK_FETCH_RETRIES", DEFAULT_FETCH_RETRIES), delay)
            .with_backoff(backoff);
        let mutation_retry = RetryPolicy::new(env_parse("CINEDESK_MUTATION_RETRIES", DEFAULT_MUTATION_RETRIES), delay)
            .with_backoff(backoff);
        let request_timeout = std::env::var("CINEDESK_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        Ok(Self { environment, base_url, session_token, fetch_retry, mutation_retry, request_timeout })
    }

    /// Config pointing at `base_url` with default retry settings.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let delay = Duration::from_millis(DEFAULT_FETCH_RETRY_DELAY_MS);
        Self {
            environment: Environment::Development,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_token: None,
            fetch_retry: RetryPolicy::new(DEFAULT_FETCH_RETRIES, delay),
            mutation_retry: RetryPolicy::new(DEFAULT_MUTATION_RETRIES, delay),
            request_timeout: None,
        }
    }
}

fn select_base_url(environment: Environment) -> Result<String, AdminError> {
    match environment {
        Environment::Development => {
            Ok(std::env::var("CINEDESK_DEV_BASE_URL").unwrap_or_else(|_| DEFAULT_DEV_BASE_URL.to_string()))
        }
        Environment::Production => std::env::var("CINEDESK_PROD_BASE_URL").map_err(|_| {
            AdminError::Config("CINEDESK_PROD_BASE_URL must be set when CINEDESK_ENV=production".into())
        }),
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_environment(raw: Option<&str>) -> Result<Environment, AdminError> {
    match raw.unwrap_or("development") {
        "development" | "dev" => Ok(Environment::Development),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(AdminError::Config(format!("unknown CINEDESK_ENV: {other}"))),
    }
}

fn parse_backoff(raw: Option<&str>) -> Result<Backoff, AdminError> {
    match raw.unwrap_or("fixed") {
        "fixed" => Ok(Backoff::Fixed),
        "exponential" => Ok(Backoff::Exponential),
        other => Err(AdminError::Config(format!(
            "unsupported CINEDESK_FETCH_BACKOFF '{other}' (expected 'fixed' or 'exponential')"
        ))),
    }
}
