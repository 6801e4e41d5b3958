//! Top-level router configuration.
//!
//! # Route Structure
//!
//! All routes live under the configured context path (none when it is empty
//! or `/`):
//!
//! - `/user/*`  - Accounts and administration
//! - `/health`  - Liveness probe
//!
//! Anything else answers with the not-found envelope.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Mirrored origin with credentials
//! - **Recovery** - Panics become the system error envelope
//! - **Admin authorization** - On administration routes only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, recovery, tracing};
use crate::config::ServerConfig;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use axum::Router;
use axum::http::{Method, Uri};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router without path normalization.
///
/// `context_path` must be `None` or a path starting with `/` and without a
/// trailing slash (see [`ServerConfig::context_path`]).
pub fn api_router(state: AppState, context_path: Option<&str>) -> Router {
    let api = Router::new()
        .nest("/user", api::routes::user_routes(state.clone()))
        .nest("/health", api::routes::health_routes());

    let router = match context_path {
        Some(path) => Router::new().nest(path, api),
        None => api,
    };

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(recovery::layer())
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed.
pub fn app_router(state: AppState, server: &ServerConfig) -> NormalizePath<Router> {
    let context_path = server.context_path();
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, context_path.as_deref()))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::with_message(ErrorCode::NotFoundError, format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::NotFoundError,
        format!("No route for {method} {}", uri.path()),
    )
}
