//! Project data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use obra_shared::types::{Currency, ProjectId, UserId};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Initial planning.
    #[default]
    Planning,
    /// Work underway.
    InProgress,
    /// Work finished.
    Completed,
    /// Paused.
    OnHold,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planning" => Some(Self::Planning),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "on_hold" => Some(Self::OnHold),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A construction project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Declared budget ceiling, if any.
    pub budget_ceiling: Option<Decimal>,
    /// Currency for the ceiling and rollups.
    pub currency: Currency,
    /// Owning user, stamped from the caller's principal.
    pub owner_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name (at least three characters).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status; defaults to planning.
    pub status: Option<ProjectStatus>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Declared budget ceiling.
    pub budget_ceiling: Option<Decimal>,
    /// Currency; the configured default applies when omitted.
    pub currency: Option<Currency>,
}

/// Input for updating a project.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// New name.
    pub name: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<ProjectStatus>,
    /// New start date (`Some(None)` clears it).
    pub start_date: Option<Option<NaiveDate>>,
    /// New end date (`Some(None)` clears it).
    pub end_date: Option<Option<NaiveDate>>,
    /// New ceiling (`Some(None)` removes it).
    pub budget_ceiling: Option<Option<Decimal>>,
    /// New currency.
    pub currency: Option<Currency>,
}
