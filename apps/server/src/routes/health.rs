use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub port: u16,
    pub version: &'static str,
    pub resend_configured: bool,
    pub openai_configured: bool,
    pub resume_source_configured: bool,
    pub contact_email: String,
    pub resend_from: String,
}

/// GET /api/health
/// Reports liveness and which integrations are configured. Never fails.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        ok: true,
        port: config.port,
        version: env!("CARGO_PKG_VERSION"),
        resend_configured: config.resend_configured(),
        openai_configured: config.openai_configured(),
        resume_source_configured: state.resume_source.is_some(),
        contact_email: config.contact_email.clone(),
        resend_from: config.resend_from.clone(),
    })
}
