//! Error taxonomy for the mapping store and the orchestrator.

use crate::domain::repositories::CODE_UNIQUE_CONSTRAINT;
use thiserror::Error;

/// Failures reported by a [`crate::domain::repositories::MappingStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint `{constraint}` rejected the write")]
    UniqueViolation { constraint: String },

    /// A row inserted earlier in the same transaction could not be found.
    #[error("Row {id} is missing from its own transaction")]
    MissingRow { id: i64 },

    /// Connectivity loss, timeout, or any other database failure.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Outcomes of core operations other than success.
///
/// `NotFound` is an expected result. `Persistence` means the store failed and
/// any open transaction was rolled back. `InvariantViolation` is a bug signal
/// and is never retried.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Short code '{code}' not found")]
    NotFound { code: String },

    #[error("Persistence failure: {0}")]
    Persistence(#[source] StoreError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl StoreError {
    /// Returns true if the write collided on the short code column.
    pub fn is_code_collision(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint } if constraint == CODE_UNIQUE_CONSTRAINT
        )
    }
}

impl MappingError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Returns true for the expected "no such code" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for MappingError {
    fn from(e: StoreError) -> Self {
        Self::Persistence(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = MappingError::not_found("abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Short code 'abc' not found");
    }

    #[test]
    fn test_store_error_becomes_persistence() {
        let err: MappingError = StoreError::MissingRow { id: 3 }.into();
        assert!(matches!(err, MappingError::Persistence(StoreError::MissingRow { id: 3 })));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_is_code_collision_checks_constraint_name() {
        let code = StoreError::UniqueViolation {
            constraint: "urls_code_key".to_string(),
        };
        let other = StoreError::UniqueViolation {
            constraint: "urls_pkey".to_string(),
        };

        assert!(code.is_code_collision());
        assert!(!other.is_code_collision());
        assert!(!StoreError::MissingRow { id: 1 }.is_code_collision());
    }

    #[test]
    fn test_unique_violation_message_names_constraint() {
        let err = StoreError::UniqueViolation {
            constraint: "urls_code_key".to_string(),
        };
        assert!(err.to_string().contains("urls_code_key"));
    }
}
