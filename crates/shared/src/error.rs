//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every error carries enough context (entity kind, identity, offending
/// field) for the caller to decide retry vs. surface-to-user.
/// `ConcurrencyConflict` is the only kind callers are expected to retry
/// automatically; all others are terminal for the current request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Dangling reference to an entity that does not exist.
    #[error("Reference error: {0}")]
    Reference(String),

    /// Uniqueness or business-rule conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Mutation attempted on a frozen budget version.
    #[error("Immutable version: {0}")]
    ImmutableVersion(String),

    /// Stale version supplied to a mutation.
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    /// Lookup by identity failed.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Returns the error code for callers marshaling to a transport.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Reference(_) => "REFERENCE_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::ImmutableVersion(_) => "IMMUTABLE_VERSION",
            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Returns true if the caller should re-read current state and retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Reference(String::new()).error_code(),
            "REFERENCE_ERROR"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::ImmutableVersion(String::new()).error_code(),
            "IMMUTABLE_VERSION"
        );
        assert_eq!(
            AppError::ConcurrencyConflict(String::new()).error_code(),
            "CONCURRENCY_CONFLICT"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_only_concurrency_conflict_is_retryable() {
        assert!(AppError::ConcurrencyConflict(String::new()).is_retryable());
        assert!(!AppError::Validation(String::new()).is_retryable());
        assert!(!AppError::Reference(String::new()).is_retryable());
        assert!(!AppError::Conflict(String::new()).is_retryable());
        assert!(!AppError::ImmutableVersion(String::new()).is_retryable());
        assert!(!AppError::NotFound(String::new()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("quantity cannot be negative".into()).to_string(),
            "Validation error: quantity cannot be negative"
        );
        assert_eq!(
            AppError::NotFound("budget 42".into()).to_string(),
            "Not found: budget 42"
        );
    }
}
