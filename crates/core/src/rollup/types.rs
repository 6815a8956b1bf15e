//! Rollup result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use obra_shared::types::{Money, ProjectId};

/// Summary of a project's committed cost against its declared ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// The summarized project.
    pub project_id: ProjectId,
    /// Sum of the current Draft budgets' totals.
    pub committed: Money,
    /// The declared ceiling, if any.
    pub ceiling: Option<Money>,
    /// Whether committed cost exceeds the ceiling; `None` without a ceiling.
    pub over_budget: Option<bool>,
    /// Committed as a percentage of the ceiling, rounded to two decimals;
    /// `None` without a positive ceiling.
    pub utilization_percent: Option<Decimal>,
    /// Number of Draft budgets contributing to `committed`.
    pub draft_budgets: usize,
}
