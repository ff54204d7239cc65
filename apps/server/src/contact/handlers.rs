use axum::{extract::rejection::BytesRejection, extract::State, Json};
use bytes::Bytes;
use serde::Serialize;

use crate::contact::models::{ContactMessage, ContactPayload, MISSING_FIELDS};
use crate::errors::AppError;
use crate::routes::body;
use crate::state::AppState;

/// Largest accepted contact form body, in bytes.
pub const CONTACT_BODY_LIMIT: usize = 200_000;

pub const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const NOT_CONFIGURED: &str =
    "Contact form is not configured. Please set RESEND_API_KEY in your .env file.";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/contact
///
/// Validates the form and forwards it to the email API. Input errors are
/// reported before configuration errors.
pub async fn handle_contact(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let bytes = body::buffered(body, CONTACT_BODY_LIMIT)?;
    let payload: ContactPayload = body::parse_json(&bytes, MISSING_FIELDS)?;
    let message = ContactMessage::try_from(payload)?;

    let email = state
        .email
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured(NOT_CONFIGURED.to_string()))?;

    email.send_contact(&message).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: SENT_MESSAGE,
    }))
}
