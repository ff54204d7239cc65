use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::upstream::UpstreamFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders the same `{success:false, message}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Path traversal rejected")]
    PathTraversal,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamFailure),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream(failure) => AppError::Upstream(failure),
            LlmError::EmptyContent => AppError::Llm("No content in OpenAI response".to_string()),
            LlmError::Parse(e) => {
                tracing::debug!("LLM payload rejected: {e}");
                AppError::Llm("Failed to parse AI response as JSON".to_string())
            }
            LlmError::NotAnObject => {
                AppError::Llm("Failed to parse AI response as JSON".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PathTraversal => (StatusCode::BAD_REQUEST, "Bad Request".to_string()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),
            AppError::PayloadTooLarge { limit } => {
                tracing::warn!("Rejected request body larger than {limit} bytes");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request body too large".to_string(),
                )
            }
            AppError::NotConfigured(msg) => {
                tracing::warn!("{msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Upstream(failure) => {
                tracing::error!(
                    service = failure.service,
                    status = ?failure.status,
                    "Upstream API error: {}",
                    failure.message
                );
                let (status, message) = failure.response_parts();
                (status, message.to_string())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error processing request".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::PathTraversal, StatusCode::BAD_REQUEST),
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (
                AppError::PayloadTooLarge { limit: 10 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                AppError::NotConfigured("missing".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal(anyhow::anyhow!("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_upstream_failure_maps_to_bad_gateway() {
        let err = AppError::from(UpstreamFailure {
            service: "Resend",
            status: Some(StatusCode::UNAUTHORIZED),
            message: "API key is invalid".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_llm_errors_map_to_client_messages() {
        match AppError::from(LlmError::EmptyContent) {
            AppError::Llm(msg) => assert_eq!(msg, "No content in OpenAI response"),
            other => panic!("unexpected: {other:?}"),
        }
        match AppError::from(LlmError::NotAnObject) {
            AppError::Llm(msg) => assert_eq!(msg, "Failed to parse AI response as JSON"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
