//! Validation of URLs submitted for shortening.
//!
//! Accepted URLs are stored in their parsed, serialized form, so what a
//! redirect sends back is always a valid header value.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host and returns it
/// parsed.
///
/// Parsing trims surrounding whitespace and drops embedded tabs and newlines;
/// callers store [`Url::as_str`] rather than the raw input.
///
/// Rejects `javascript:`, `data:`, `file:` and other non-web schemes.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when no host is present.
pub fn validate_http_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_http_url("https://example.com/a").is_ok());
        assert!(validate_http_url("http://example.com:8080/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_rejects_relative_urls() {
        assert!(matches!(
            validate_http_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_http_url("/just/a/path").is_err());
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/plain,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert_eq!(
                validate_http_url(input).unwrap_err(),
                UrlValidationError::UnsupportedProtocol,
                "{input}"
            );
        }
    }

    #[test]
    fn test_serialized_form_drops_whitespace_and_control_chars() {
        let url = validate_http_url("  https://example.com/lead\n").unwrap();
        assert_eq!(url.as_str(), "https://example.com/lead");

        let url = validate_http_url("https://example.com/a\nb\tc").unwrap();
        assert_eq!(url.as_str(), "https://example.com/abc");

        let url = validate_http_url("https://Example.COM").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_empty_string() {
        assert!(validate_http_url("").is_err());
    }
}
