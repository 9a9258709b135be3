//! API route configuration.

use crate::api::handlers::{create_url_handler, delete_url_handler, list_urls_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// URL management routes.
///
/// # Endpoints
///
/// - `POST   /urls`          - Create a short URL
/// - `GET    /urls`          - List all short URLs
/// - `DELETE /urls/{code}`   - Delete a short URL
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{code}", delete(delete_url_handler))
}
