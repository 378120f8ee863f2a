//! Shared HTTP plumbing for the source adapters
//!
//! Both sources are plain JSON-over-GET APIs. This module owns the
//! `reqwest` client, the retry loop and the mapping from transport and
//! status failures onto [`SourceError`].

use crate::config::RetryConfig;
use crate::domain::{HolonetError, Result, SourceError};
use crate::log_retry_attempt;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Upper bound for establishing a connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters of an error body kept in error messages
const BODY_EXCERPT_CHARS: usize = 200;

/// JSON GET client with per-request timeout and retry policy
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
    retry: RetryConfig,
}

impl JsonClient {
    /// Builds a client
    ///
    /// # Errors
    ///
    /// Returns [`HolonetError::Configuration`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .user_agent(concat!("holonet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HolonetError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, retry })
    }

    /// Fetches `url` and decodes the body as JSON
    ///
    /// Retryable failures (connection errors, timeouts, 429 and 5xx) are
    /// retried with exponential backoff.
    pub async fn get_json(&self, url: &str) -> std::result::Result<Value, SourceError> {
        retry_request(&self.retry, || self.get_json_once(url)).await
    }

    async fn get_json_once(&self, url: &str) -> std::result::Result<Value, SourceError> {
        tracing::trace!(url = %url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(map_status(url, status, &body));
        }

        resp.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(url.to_string())
            } else {
                SourceError::InvalidResponse(format!("{url}: {e}"))
            }
        })
    }
}

/// Retry an operation with exponential backoff
///
/// Makes up to `policy.max_retries` attempts. Errors that are not
/// retryable are returned immediately.
pub async fn retry_request<F, T, Fut>(
    policy: &RetryConfig,
    operation: F,
) -> std::result::Result<T, SourceError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = std::result::Result<T, SourceError>>,
{
    let max_attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if attempt >= max_attempts || !e.is_retryable() {
                    return Err(e);
                }

                let delay = policy.delay_after(attempt);
                log_retry_attempt!(attempt, max_attempts, e);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn map_transport_error(url: &str, e: &reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout(url.to_string())
    } else {
        SourceError::ConnectionFailed(format!("{url}: {e}"))
    }
}

/// Maps a non-success status onto a [`SourceError`]
pub fn map_status(url: &str, status: StatusCode, body: &str) -> SourceError {
    let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();

    if status == StatusCode::NOT_FOUND {
        SourceError::NotFound(url.to_string())
    } else if status.is_server_error() {
        SourceError::ServerError {
            status: status.as_u16(),
            message: excerpt,
        }
    } else {
        SourceError::ClientError {
            status: status.as_u16(),
            message: excerpt,
        }
    }
}
