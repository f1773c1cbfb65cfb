//! HTTP fetcher implementation
//!
//! This module handles every request the crawler makes:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests decoded as JSON arrays
//! - Stripping the trailing sentinel element the catalog API appends
//! - Error classification into transient (restart-worthy) and malformed
//!
//! # Error Classification
//!
//! | Condition | Outcome | Logged |
//! |-----------|---------|--------|
//! | Deadline exceeded | `Transient(Timeout)` | debug only |
//! | Connection / protocol failure | `Transient(Network)` | warn |
//! | Non-2xx status | `Transient(Network)` | warn |
//! | Body not JSON, or not an array | `Malformed` | warn |

use crate::config::FetchConfig;
use crate::state::TransientKind;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Decoded array with the sentinel element removed
    Payload(Vec<Value>),

    /// Failure likely to clear up on retry; the whole crawl restarts
    Transient {
        /// Timeout or network failure
        kind: TransientKind,
        /// Error description
        error: String,
    },

    /// The response could not be used; the node is treated as empty
    Malformed {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns true if this outcome should trigger a full restart
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// The payload, or an empty list for any failure
    pub fn into_payload(self) -> Vec<Value> {
        match self {
            Self::Payload(payload) => payload,
            Self::Transient { .. } | Self::Malformed { .. } => Vec::new(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use catalog_crawl::config::FetchConfig;
/// use catalog_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Single-request JSON fetcher
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a client built from the fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and decodes it as a catalog payload
    ///
    /// Never fails outward: every failure is folded into the outcome.
    pub async fn fetch_json(&self, url: &str) -> FetchOutcome {
        tracing::trace!(url, "GET");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify_transport_error(url, e),
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "HTTP error response");
            return FetchOutcome::Transient {
                kind: TransientKind::Network,
                error: format!("HTTP status {}", status),
            };
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return classify_transport_error(url, e),
        };

        match decode_payload(&body) {
            Ok(payload) => FetchOutcome::Payload(payload),
            Err(error) => {
                tracing::warn!(url, %error, "Malformed response");
                FetchOutcome::Malformed { error }
            }
        }
    }
}

/// Maps a transport-level error to a transient outcome
fn classify_transport_error(url: &str, e: reqwest::Error) -> FetchOutcome {
    if e.is_timeout() {
        tracing::debug!(url, "Request timed out");
        FetchOutcome::Transient {
            kind: TransientKind::Timeout,
            error: "Request timeout".to_string(),
        }
    } else {
        tracing::warn!(url, error = %e, "Request failed");
        FetchOutcome::Transient {
            kind: TransientKind::Network,
            error: e.to_string(),
        }
    }
}

/// Decodes a response body and drops the trailing sentinel element
///
/// An empty array decodes to an empty payload.
pub fn decode_payload(body: &[u8]) -> Result<Vec<Value>, String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {}", e))?;

    match value {
        Value::Array(mut items) => {
            items.pop();
            Ok(items)
        }
        other => Err(format!("expected a JSON array, got {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
