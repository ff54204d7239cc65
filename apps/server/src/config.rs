use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_RESEND_FROM: &str = "Portfolio Contact <onboarding@resend.dev>";
pub const DEFAULT_CONTACT_EMAIL: &str = "portfolio@example.com";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Application configuration loaded from environment variables.
/// Credentials are optional: a missing key disables its endpoint instead of
/// failing start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dist_dir: PathBuf,
    pub resend_api_key: Option<String>,
    pub resend_from: String,
    pub contact_email: String,
    pub resend_api_url: String,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub resume_source_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            dist_dir: PathBuf::from(var("DIST_DIR", "dist")),
            resend_api_key: secret(lookup("RESEND_API_KEY")),
            resend_from: var("RESEND_FROM", DEFAULT_RESEND_FROM),
            contact_email: var("CONTACT_EMAIL", DEFAULT_CONTACT_EMAIL),
            resend_api_url: trim_base_url(var("RESEND_API_URL", DEFAULT_RESEND_API_URL)),
            openai_api_key: secret(lookup("OPENAI_API_KEY")),
            openai_api_url: trim_base_url(var("OPENAI_API_URL", DEFAULT_OPENAI_API_URL)),
            openai_model: var("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            resume_source_path: PathBuf::from(var("RESUME_SOURCE_PATH", "content/resume.md")),
            rust_log: var("RUST_LOG", "info"),
        })
    }

    pub fn resend_configured(&self) -> bool {
        self.resend_api_key.is_some()
    }

    pub fn openai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

// Blank credentials are treated the same as unset ones.
fn secret(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
