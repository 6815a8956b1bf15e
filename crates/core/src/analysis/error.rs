//! Unit price analysis error types.

use thiserror::Error;

use obra_shared::types::{AnalysisId, ResourceId};
use obra_shared::AppError;

/// Analysis-related errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Analysis code is required.
    #[error("Analysis code is required")]
    EmptyCode,

    /// Analysis description is required.
    #[error("Analysis description is required")]
    EmptyDescription,

    /// Analysis unit is required.
    #[error("Analysis unit is required")]
    EmptyUnit,

    /// Item quantity cannot be negative.
    #[error("Item {index}: quantity cannot be negative")]
    NegativeQuantity {
        /// Position of the offending item.
        index: usize,
    },

    /// Referenced resource does not exist.
    #[error("Unknown resource: {0}")]
    UnknownResource(ResourceId),

    /// Analysis code already in use.
    #[error("Analysis code already in use: {0}")]
    DuplicateCode(String),

    /// Item index outside the analysis.
    #[error("Item index {index} out of range (analysis has {len} items)")]
    ItemOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of items in the analysis.
        len: usize,
    },

    /// Analysis not found.
    #[error("Analysis not found: {0}")]
    NotFound(AnalysisId),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyCode
            | AnalysisError::EmptyDescription
            | AnalysisError::EmptyUnit
            | AnalysisError::NegativeQuantity { .. }
            | AnalysisError::ItemOutOfRange { .. } => Self::Validation(err.to_string()),
            AnalysisError::UnknownResource(_) => Self::Reference(err.to_string()),
            AnalysisError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            AnalysisError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
