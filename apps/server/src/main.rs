mod config;
mod contact;
mod email_client;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod state;
mod static_files;
mod upstream;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on an unparsable PORT)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio server v{}", env!("CARGO_PKG_VERSION"));

    let resume_source = load_resume_source(&config).await;

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    info!(
        "Contact API: {} -> {} (from: {})",
        if config.resend_configured() {
            "configured"
        } else {
            "NOT configured"
        },
        config.contact_email,
        config.resend_from
    );
    info!(
        "Resume API: {} (model: {})",
        if config.openai_configured() && resume_source.is_some() {
            "configured"
        } else {
            "NOT configured"
        },
        config.openai_model
    );
    if !config.dist_dir.join(static_files::ROOT_DOCUMENT).is_file() {
        warn!(
            "No {} under {}; non-API requests will fail until the front end is built",
            static_files::ROOT_DOCUMENT,
            config.dist_dir.display()
        );
    }

    let bind_to = (config.host.clone(), config.port);
    let state = AppState::new(config, http, resume_source);

    let app = build_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = tokio::net::TcpListener::bind(bind_to).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Portfolio server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Reads the resume text for the tailoring prompt. A missing file disables
/// only the resume endpoint.
async fn load_resume_source(config: &Config) -> Option<String> {
    match tokio::fs::read_to_string(&config.resume_source_path).await {
        Ok(text) if !text.trim().is_empty() => {
            info!(
                "Loaded resume source from {}",
                config.resume_source_path.display()
            );
            Some(text)
        }
        Ok(_) => {
            warn!(
                "Resume source {} is empty; resume generation disabled",
                config.resume_source_path.display()
            );
            None
        }
        Err(e) => {
            warn!(
                "Cannot read resume source {}: {e}; resume generation disabled",
                config.resume_source_path.display()
            );
            None
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
