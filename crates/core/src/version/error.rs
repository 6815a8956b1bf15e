//! Version chain error types.

use thiserror::Error;

use obra_shared::types::BudgetId;
use obra_shared::AppError;

/// Version-related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Mutation attempted on a sealed version.
    #[error("Budget {budget} version {version} is frozen and cannot be modified")]
    ImmutableVersion {
        /// The budget lineage.
        budget: BudgetId,
        /// The sealed version number.
        version: u32,
    },

    /// The caller's observed version is no longer current.
    #[error("Budget {budget}: observed version {observed} is stale (current draft is {current})")]
    StaleVersion {
        /// The budget lineage.
        budget: BudgetId,
        /// The current Draft version.
        current: u32,
        /// The version the caller observed.
        observed: u32,
    },

    /// Version number not present in the lineage.
    #[error("Budget {budget} has no version {version}")]
    UnknownVersion {
        /// The budget lineage.
        budget: BudgetId,
        /// The requested version number.
        version: u32,
    },
}

impl From<VersionError> for AppError {
    fn from(err: VersionError) -> Self {
        match err {
            VersionError::ImmutableVersion { .. } => Self::ImmutableVersion(err.to_string()),
            VersionError::StaleVersion { .. } => Self::ConcurrencyConflict(err.to_string()),
            VersionError::UnknownVersion { .. } => Self::NotFound(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error_kinds() {
        let budget = BudgetId::new();
        assert_eq!(
            AppError::from(VersionError::ImmutableVersion { budget, version: 1 }).error_code(),
            "IMMUTABLE_VERSION"
        );
        let stale = AppError::from(VersionError::StaleVersion {
            budget,
            current: 3,
            observed: 2,
        });
        assert_eq!(stale.error_code(), "CONCURRENCY_CONFLICT");
        assert!(stale.is_retryable());
        assert_eq!(
            AppError::from(VersionError::UnknownVersion { budget, version: 9 }).error_code(),
            "NOT_FOUND"
        );
    }
}
