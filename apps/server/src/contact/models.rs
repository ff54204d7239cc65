//! Contact form payload and its validation rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::errors::AppError;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Raw form submission. Every field is optional so that an incomplete form
/// is reported as missing fields rather than as malformed JSON.
#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated contact message, ready to be forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl TryFrom<ContactPayload> for ContactMessage {
    type Error = AppError;

    fn try_from(payload: ContactPayload) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(message)) = (
            non_blank(payload.name),
            non_blank(payload.email),
            non_blank(payload.message),
        ) else {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        };

        if !EMAIL_SHAPE.is_match(&email) {
            return Err(AppError::Validation(INVALID_EMAIL.to_string()));
        }

        if message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(AppError::Validation(MESSAGE_TOO_SHORT.to_string()));
        }

        Ok(ContactMessage {
            name,
            email,
            message,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
