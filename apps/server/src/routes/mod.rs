pub mod body;
pub mod cors;
pub mod health;


use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{uri::PathAndQuery, StatusCode, Uri},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;

use crate::contact::handlers::{handle_contact, CONTACT_BODY_LIMIT};
use crate::errors::AppError;
use crate::resume::handlers::{handle_generate, RESUME_BODY_LIMIT};
use crate::state::AppState;
use crate::static_files::{
    self,
    path::{canonical_path, checked_path},
};

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Rejects parent-directory sequences, then hands the route table the
/// decoded path so percent-encoded spellings reach the same route.
async fn normalize_path(mut request: Request, next: Next) -> Result<Response, AppError> {
    let decoded = checked_path(request.uri().path())?;
    let canonical = canonical_path(&decoded);
    if canonical != request.uri().path() {
        *request.uri_mut() = with_path(request.uri(), &canonical)?;
    }
    Ok(next.run(request).await)
}

fn with_path(uri: &Uri, path: &str) -> Result<Uri, AppError> {
    let bad_request = || AppError::Validation("Bad Request".to_string());
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        path_and_query
            .parse::<PathAndQuery>()
            .map_err(|_| bad_request())?,
    );
    Uri::from_parts(parts).map_err(|_| bad_request())
}

/// A JSON proxy endpoint: POST plus CORS, with bodies of `body_limit` bytes
/// or more rejected.
fn json_endpoint(handler: MethodRouter<AppState>, body_limit: usize) -> MethodRouter<AppState> {
    handler
        .options(preflight)
        .fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(cors::api_cors))
                .layer(DefaultBodyLimit::max(body_limit - 1)),
        )
}

/// Route table, in priority order: the traversal guard, exact API routes,
/// then static resolution as the fallback.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/api/health",
            get(health::health_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/contact",
            json_endpoint(post(handle_contact), CONTACT_BODY_LIMIT),
        )
        .route(
            "/api/resume/generate",
            json_endpoint(post(handle_generate), RESUME_BODY_LIMIT),
        )
        .fallback(static_files::handle_static)
        .with_state(state);

    // Layers on a router run after its own matching, so the path is
    // normalized one level up, before the inner table matches.
    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(normalize_path))
}
