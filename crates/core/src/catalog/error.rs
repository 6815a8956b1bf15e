//! Resource catalog error types.

use thiserror::Error;

use obra_shared::types::ResourceId;
use obra_shared::AppError;

/// Catalog-related errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Resource name is required.
    #[error("Resource name is required")]
    EmptyName,

    /// Resource unit is required.
    #[error("Resource unit is required")]
    EmptyUnit,

    /// Unit cost cannot be negative.
    #[error("Resource unit cost cannot be negative")]
    NegativeUnitCost,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyName | CatalogError::EmptyUnit | CatalogError::NegativeUnitCost => {
                Self::Validation(err.to_string())
            }
            CatalogError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
