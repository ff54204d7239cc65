//! Static asset serving with single-page-application fallback.
//!
//! Existing files under the asset root are served with a long-lived immutable
//! cache policy. Any other path gets the root document, which is never cached,
//! so client-side routing always starts from a fresh entry point.

pub mod mime;
pub mod path;

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tokio::fs;

use crate::errors::AppError;
use crate::state::AppState;

pub const ROOT_DOCUMENT: &str = "index.html";
pub const IMMUTABLE: &str = "public, max-age=31536000, immutable";
pub const NO_CACHE: &str = "no-cache";

/// A file loaded from the asset root, ready to be sent.
#[derive(Debug)]
pub struct Asset {
    pub body: Bytes,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, self.cache_control),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Read-only view of the pre-built front-end bundle.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a raw request path to an asset, falling back to the root document.
    pub async fn resolve(&self, raw_path: &str) -> Result<Asset, AppError> {
        let decoded = path::checked_path(raw_path)?;
        let candidate = self.root.join(path::relative_asset_path(&decoded));

        if is_file(&candidate).await {
            return load(&candidate).await;
        }

        tracing::debug!("No asset for {decoded}, serving root document");
        self.root_document().await
    }

    pub async fn root_document(&self) -> Result<Asset, AppError> {
        load(&self.root.join(ROOT_DOCUMENT)).await
    }
}

async fn is_file(candidate: &Path) -> bool {
    fs::metadata(candidate)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn load(file: &Path) -> Result<Asset, AppError> {
    let body = fs::read(file)
        .await
        .with_context(|| format!("Failed to read static file '{}'", file.display()))?;

    let extension = file.extension().and_then(|e| e.to_str());
    let content_type = mime::content_type_for(extension);
    let cache_control = if content_type == mime::HTML {
        NO_CACHE
    } else {
        IMMUTABLE
    };

    Ok(Asset {
        body: Bytes::from(body),
        content_type,
        cache_control,
    })
}

/// Router fallback: any path not claimed by an API route.
pub async fn handle_static(State(state): State<AppState>, uri: Uri) -> Result<Asset, AppError> {
    state.assets.resolve(uri.path()).await
}
