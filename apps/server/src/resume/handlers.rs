//! Axum route handler for the resume generation API.

use axum::{extract::rejection::BytesRejection, extract::State, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::resume::prompts::{build_system_prompt, build_user_prompt};
use crate::routes::body;
use crate::state::AppState;

/// Largest accepted generation request body, in bytes.
pub const RESUME_BODY_LIMIT: usize = 500_000;

pub const MISSING_JOB_DESCRIPTION: &str = "Missing jobDescription field";
pub const LLM_NOT_CONFIGURED: &str = "OPENAI_API_KEY is not configured.";
pub const SOURCE_NOT_CONFIGURED: &str =
    "Resume source is not configured. Set RESUME_SOURCE_PATH to a readable file.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub resume: Map<String, Value>,
}

/// POST /api/resume/generate
///
/// Sends the job description to the LLM alongside the resume prompt and relays
/// the parsed JSON object verbatim.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let bytes = body::buffered(body, RESUME_BODY_LIMIT)?;
    let request: GenerateRequest = body::parse_json(&bytes, MISSING_JOB_DESCRIPTION)?;

    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_JOB_DESCRIPTION.to_string()))?;

    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured(LLM_NOT_CONFIGURED.to_string()))?;
    let resume_source = state
        .resume_source
        .as_deref()
        .ok_or_else(|| AppError::NotConfigured(SOURCE_NOT_CONFIGURED.to_string()))?;

    info!(
        "Generating tailored resume (model: {}, job description: {} chars)",
        llm.model(),
        job_description.chars().count()
    );

    let resume = llm
        .call_json_object(
            &build_user_prompt(&job_description),
            &build_system_prompt(resume_source),
        )
        .await?;

    Ok(Json(GenerateResponse {
        success: true,
        resume,
    }))
}
