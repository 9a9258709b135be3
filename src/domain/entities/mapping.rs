//! Mapping entity: the persisted association of an id, its short code and the
//! original URL.

use chrono::{DateTime, Utc};

use crate::utils::base62;

/// A committed short-code mapping.
///
/// `code` is always the base-62 encoding of `id`; see [`Mapping::has_canonical_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: i64,
    pub original_url: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(id: i64, original_url: String, code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original_url,
            code,
            created_at,
        }
    }

    /// Returns the code this mapping's id must carry.
    ///
    /// `None` for negative ids, which no store ever assigns.
    pub fn expected_code(&self) -> Option<String> {
        u64::try_from(self.id).ok().map(base62::encode)
    }

    /// Returns true if the stored code equals the encoding of the stored id.
    pub fn has_canonical_code(&self) -> bool {
        self.expected_code().is_some_and(|expected| expected == self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = Mapping::new(
            1,
            "https://example.com/a".to_string(),
            "1".to_string(),
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.code, "1");
        assert_eq!(mapping.original_url, "https://example.com/a");
        assert_eq!(mapping.created_at, now);
        assert!(mapping.has_canonical_code());
    }

    #[test]
    fn test_mapping_expected_code() {
        let mapping = Mapping::new(62, "https://example.com".to_string(), "10".to_string(), Utc::now());
        assert_eq!(mapping.expected_code().as_deref(), Some("10"));
    }

    #[test]
    fn test_mapping_detects_mismatched_code() {
        let mapping = Mapping::new(2, "https://example.com".to_string(), "1".to_string(), Utc::now());
        assert!(!mapping.has_canonical_code());
    }

    #[test]
    fn test_mapping_with_placeholder_code_is_not_canonical() {
        let mapping = Mapping::new(
            7,
            "https://example.com".to_string(),
            "~00000000deadbeef".to_string(),
            Utc::now(),
        );
        assert!(!mapping.has_canonical_code());
    }

    #[test]
    fn test_mapping_negative_id_has_no_code() {
        let mapping = Mapping::new(-1, "https://example.com".to_string(), "1".to_string(), Utc::now());
        assert!(mapping.expected_code().is_none());
        assert!(!mapping.has_canonical_code());
    }
}
