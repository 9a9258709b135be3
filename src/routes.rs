//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /urls`          - Create a short URL
//! - `GET    /urls`          - List short URLs
//! - `DELETE /urls/{code}`   - Delete a short URL
//! - `GET    /u/{code}`      - Redirect to the original URL
//! - `GET    /health`        - Liveness probe with store check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::url_routes())
        .route("/u/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
