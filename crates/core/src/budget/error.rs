//! Budget error types.

use thiserror::Error;

use obra_shared::types::{AnalysisId, BudgetId};
use obra_shared::AppError;

use crate::version::error::VersionError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget name is required.
    #[error("Budget name is required")]
    EmptyName,

    /// Item quantity cannot be negative.
    #[error("Item {index}: quantity cannot be negative")]
    NegativeQuantity {
        /// Position of the offending item.
        index: usize,
    },

    /// Item unit cost cannot be negative.
    #[error("Item {index}: unit cost cannot be negative")]
    NegativeUnitCost {
        /// Position of the offending item.
        index: usize,
    },

    /// Direct line description is required.
    #[error("Item {index}: direct line description is required")]
    EmptyDirectDescription {
        /// Position of the offending item.
        index: usize,
    },

    /// Referenced analysis does not exist.
    #[error("Unknown analysis: {0}")]
    UnknownAnalysis(AnalysisId),

    /// Budget name already used by a live lineage of this project.
    #[error("Budget name already in use for this project: {0}")]
    DuplicateName(String),

    /// Item index outside the budget.
    #[error("Item index {index} out of range (budget has {len} items)")]
    ItemOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of items in the budget.
        len: usize,
    },

    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Version state or concurrency violation.
    #[error(transparent)]
    Version(#[from] VersionError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::EmptyName
            | BudgetError::NegativeQuantity { .. }
            | BudgetError::NegativeUnitCost { .. }
            | BudgetError::EmptyDirectDescription { .. }
            | BudgetError::ItemOutOfRange { .. } => Self::Validation(err.to_string()),
            BudgetError::UnknownAnalysis(_) => Self::Reference(err.to_string()),
            BudgetError::DuplicateName(_) => Self::Conflict(err.to_string()),
            BudgetError::NotFound(_) => Self::NotFound(err.to_string()),
            BudgetError::Version(inner) => inner.into(),
        }
    }
}
