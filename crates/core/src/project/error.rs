//! Project error types.

use thiserror::Error;

use obra_shared::types::ProjectId;
use obra_shared::AppError;

/// Minimum length for a project name.
pub const NAME_MIN_LEN: usize = 3;

/// Project-related errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project name too short.
    #[error("Project name must be at least {NAME_MIN_LEN} characters long")]
    NameTooShort,

    /// Budget ceiling cannot be negative.
    #[error("Project budget ceiling cannot be negative")]
    NegativeCeiling,

    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(ProjectId),
}

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NameTooShort | ProjectError::NegativeCeiling => {
                Self::Validation(err.to_string())
            }
            ProjectError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
