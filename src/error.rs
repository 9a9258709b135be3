//! HTTP-facing error type.
//!
//! Handlers return [`AppError`], which renders as
//! `{"error": {"code", "message", "details"}}` with a matching status code.
//! Core errors convert into it without leaking store internals.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::error::MappingError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<MappingError> for AppError {
    fn from(e: MappingError) -> Self {
        match e {
            MappingError::NotFound { code } => {
                AppError::not_found("URL not found", json!({ "code": code }))
            }
            MappingError::Persistence(_) => AppError::internal("Database error", json!({})),
            MappingError::InvariantViolation(_) => {
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::StoreError;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = MappingError::not_found("abc").into();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let info = err.to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.details["code"], "abc");
    }

    #[test]
    fn test_persistence_error_hides_details() {
        let err: AppError =
            MappingError::Persistence(StoreError::Database(sqlx::Error::PoolTimedOut)).into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, "Database error");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_invariant_violation_hides_details() {
        let err: AppError = MappingError::invariant("row 3 carries code '4'").into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("row 3"));
    }

    #[test]
    fn test_bad_request_display() {
        let err = AppError::bad_request("Invalid URL format", json!({}));
        assert_eq!(err.to_string(), "Invalid URL format");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
