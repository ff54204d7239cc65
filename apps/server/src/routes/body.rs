//! Capped JSON body parsing shared by the proxy endpoints.

use axum::{extract::rejection::BytesRejection, http::StatusCode};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::errors::AppError;

pub const INVALID_JSON: &str = "Invalid JSON body";

/// Unwraps a buffered body, mapping an exceeded `DefaultBodyLimit` to 413.
pub fn buffered(body: Result<Bytes, BytesRejection>, limit: usize) -> Result<Bytes, AppError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { limit }
        } else {
            AppError::Validation(rejection.body_text())
        }
    })
}

/// Parses a JSON body. An empty body is treated as `{}`.
///
/// Syntax errors become `Invalid JSON body`; well-formed JSON of the wrong
/// shape becomes `missing_message`.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8], missing_message: &str) -> Result<T, AppError> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => AppError::Validation(missing_message.to_string()),
        Category::Io | Category::Syntax | Category::Eof => {
            AppError::Validation(INVALID_JSON.to_string())
        }
    })
}
