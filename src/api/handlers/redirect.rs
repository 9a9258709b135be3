//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /u/{code}`
///
/// Responds with `302 Found` and a `Location` header. The response is built
/// by hand because axum's `Redirect` helpers only produce 303, 307 and 308.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued or has been deleted.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mapping = state.mapping_service.resolve_code(&code).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, mapping.original_url)],
    ))
}
