use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::email_client::EmailClient;
use crate::llm_client::LlmClient;
use crate::static_files::StaticAssets;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when RESEND_API_KEY is unset.
    pub email: Option<EmailClient>,
    /// `None` when OPENAI_API_KEY is unset.
    pub llm: Option<LlmClient>,
    /// Resume text interpolated into the tailoring prompt. `None` when the
    /// source file could not be read at start-up.
    pub resume_source: Option<Arc<str>>,
    pub assets: StaticAssets,
}

impl AppState {
    /// Wires the upstream clients that the configuration enables.
    pub fn new(config: Config, http: Client, resume_source: Option<String>) -> Self {
        let email = config.resend_api_key.clone().map(|key| {
            EmailClient::new(
                http.clone(),
                key,
                config.resend_api_url.clone(),
                config.resend_from.clone(),
                config.contact_email.clone(),
            )
        });

        let llm = config.openai_api_key.clone().map(|key| {
            LlmClient::new(
                http.clone(),
                key,
                config.openai_api_url.clone(),
                config.openai_model.clone(),
            )
        });

        Self {
            assets: StaticAssets::new(config.dist_dir.clone()),
            config: Arc::new(config),
            email,
            llm,
            resume_source: resume_source.map(Arc::from),
        }
    }
}
