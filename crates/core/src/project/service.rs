//! Project service for validation and patch application.

use chrono::Utc;
use rust_decimal::Decimal;

use obra_shared::types::{Currency, ProjectId, UserId};

use super::error::{ProjectError, NAME_MIN_LEN};
use super::types::{CreateProjectInput, Project, UpdateProjectInput};

/// Project service for business logic.
pub struct ProjectService;

impl ProjectService {
    /// Validate and build a new project owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NameTooShort` or
    /// `ProjectError::NegativeCeiling`.
    pub fn build(
        input: CreateProjectInput,
        owner_id: UserId,
        default_currency: Currency,
    ) -> Result<Project, ProjectError> {
        let name = input.name.trim();
        if name.chars().count() < NAME_MIN_LEN {
            return Err(ProjectError::NameTooShort);
        }
        if let Some(ceiling) = input.budget_ceiling {
            if ceiling < Decimal::ZERO {
                return Err(ProjectError::NegativeCeiling);
            }
        }

        let now = Utc::now();
        Ok(Project {
            id: ProjectId::new(),
            name: name.to_string(),
            description: input.description,
            status: input.status.unwrap_or_default(),
            start_date: input.start_date,
            end_date: input.end_date,
            budget_ceiling: input.budget_ceiling,
            currency: input.currency.unwrap_or(default_currency),
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch to an existing project.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`Self::build`]; on error the project is
    /// left unchanged.
    pub fn apply_patch(project: &mut Project, patch: UpdateProjectInput) -> Result<(), ProjectError> {
        if let Some(name) = &patch.name {
            if name.trim().chars().count() < NAME_MIN_LEN {
                return Err(ProjectError::NameTooShort);
            }
        }
        if let Some(Some(ceiling)) = patch.budget_ceiling {
            if ceiling < Decimal::ZERO {
                return Err(ProjectError::NegativeCeiling);
            }
        }

        if let Some(name) = patch.name {
            project.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(start_date) = patch.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            project.end_date = end_date;
        }
        if let Some(budget_ceiling) = patch.budget_ceiling {
            project.budget_ceiling = budget_ceiling;
        }
        if let Some(currency) = patch.currency {
            project.currency = currency;
        }
        project.updated_at = Utc::now();
        Ok(())
    }
}
