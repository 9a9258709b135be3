//! Handlers for URL mapping management (create, list, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{ApiResponse, CreateUrlRequest, UrlData};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validation::validate_http_url;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "status": "success",
///   "data": {
///     "id": 1,
///     "original_url": "https://example.com/a",
///     "short_code": "1",
///     "created_at": "2025-12-12T20:40:27Z"
///   },
///   "message": "Short URL created successfully."
/// }
/// ```
///
/// # Errors
///
/// The URL is stored in its parsed, serialized form (surrounding whitespace
/// trimmed, embedded tabs and newlines dropped).
///
/// Returns 400 Bad Request if the URL is not a valid HTTP(S) URL.
/// Returns 500 Internal Server Error if the mapping could not be persisted.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UrlData>>), AppError> {
    payload.validate()?;

    // only the serialized form is safe to send back in a Location header
    let url = validate_http_url(&payload.original_url)
        .map_err(|e| AppError::bad_request(e.to_string(), json!({})))?;

    let mapping = state
        .mapping_service
        .create_mapping(url.as_str())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UrlData::from(mapping),
            "Short URL created successfully.",
        )),
    ))
}

/// Lists every shortened URL ordered by id.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UrlData>>>, AppError> {
    let mappings = state.mapping_service.list_mappings().await?;
    let data = mappings.into_iter().map(UrlData::from).collect();

    Ok(Json(ApiResponse::success(
        data,
        "Successfully retrieved all short URLs.",
    )))
}

/// Deletes a short URL by its code.
///
/// # Endpoint
///
/// `DELETE /urls/{code}`
///
/// The row is removed; its id and code are never handed out again.
///
/// # Errors
///
/// Returns 404 Not Found if no mapping has this code, including when it was
/// already deleted.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.mapping_service.delete_mapping(&code).await?;

    Ok(Json(ApiResponse::message_only("URL deleted successfully.")))
}
