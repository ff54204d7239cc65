//! Normalization of failures returned by third-party HTTP APIs.
//!
//! Both the email and the LLM integrations report non-success responses
//! through `interpret_upstream_error`, so clients see the same envelope no
//! matter which service failed.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A failed call to an upstream API, reduced to a status and a message that
/// is safe to show to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{service} failed (status {status:?}): {message}")]
pub struct UpstreamFailure {
    pub service: &'static str,
    /// `None` when the request never produced an HTTP response.
    pub status: Option<StatusCode>,
    pub message: String,
}

impl UpstreamFailure {
    /// Transport-level failure: DNS, connect, TLS, or a client-side timeout.
    pub fn unreachable(service: &'static str, err: &reqwest::Error) -> Self {
        tracing::warn!("{service} transport error: {err}");
        Self {
            service,
            status: err.status(),
            message: format!("Failed to reach {service}"),
        }
    }

    /// The status and message relayed to the client.
    pub fn response_parts(&self) -> (StatusCode, &str) {
        (StatusCode::BAD_GATEWAY, &self.message)
    }
}

/// Extracts the most specific error message from an upstream response body.
///
/// Lookup order on JSON bodies: `message`, `error.message`, `error` (string).
/// Non-JSON bodies are used verbatim when non-empty.
pub fn interpret_upstream_error(
    service: &'static str,
    status: StatusCode,
    body: &str,
) -> UpstreamFailure {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("{service} request failed ({})", status.as_u16()));

    UpstreamFailure {
        service,
        status: Some(status),
        message,
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    let candidates = [
        json.get("message"),
        json.get("error").and_then(|e| e.get("message")),
        json.get("error"),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string);
    message
}
