//! DTOs for the URL mapping endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::Mapping;
use crate::utils::url_validation::validate_http_url;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The original long URL to shorten (must be HTTP or HTTPS).
    #[validate(custom(function = "validate_original_url"))]
    pub original_url: String,
}

fn validate_original_url(value: &str) -> Result<(), ValidationError> {
    validate_http_url(value).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("url");
        err.message = Some(e.to_string().into());
        err
    })
}

/// A stored mapping as returned by the API.
#[derive(Debug, Serialize)]
pub struct UrlData {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Mapping> for UrlData {
    fn from(m: Mapping) -> Self {
        Self {
            id: m.id,
            original_url: m.original_url,
            short_code: m.code,
            created_at: m.created_at,
        }
    }
}

/// Success envelope shared by the URL endpoints.
///
/// ```json
/// { "status": "success", "data": { ... }, "message": "..." }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_accepts_https() {
        let request = CreateUrlRequest {
            original_url: "https://example.com/a".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_urls() {
        for bad in ["not-a-url", "ftp://example.com", ""] {
            let request = CreateUrlRequest {
                original_url: bad.to_string(),
            };
            assert!(request.validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_url_data_renames_code() {
        let now = Utc::now();
        let data = UrlData::from(Mapping::new(
            62,
            "https://example.com".to_string(),
            "10".to_string(),
            now,
        ));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["id"], 62);
        assert_eq!(value["short_code"], "10");
        assert_eq!(value["original_url"], "https://example.com");
    }

    #[test]
    fn test_message_only_omits_data() {
        let value = serde_json::to_value(ApiResponse::message_only("URL deleted successfully.")).unwrap();
        assert_eq!(
            value,
            json!({ "status": "success", "message": "URL deleted successfully." })
        );
    }
}
