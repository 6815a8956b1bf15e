//! Rollup service: bottom-up project summaries.

use rust_decimal::Decimal;

use obra_shared::types::Money;

use crate::budget::service::BudgetService;
use crate::budget::types::Budget;
use crate::project::types::Project;

use super::types::ProjectSummary;

/// Rollup service. Pure reads only; summarizing never mutates anything.
pub struct RollupService;

impl RollupService {
    /// Summarize the project's committed cost against its ceiling.
    ///
    /// Sums `total_amount` over the project's current Draft budgets; sealed
    /// versions and other projects' budgets in the slice are ignored.
    #[must_use]
    pub fn summarize(project: &Project, budgets: &[Budget]) -> ProjectSummary {
        let drafts: Vec<&Budget> = budgets
            .iter()
            .filter(|budget| budget.project_id == project.id && budget.state.is_draft())
            .collect();
        let committed: Decimal = drafts.iter().map(|budget| BudgetService::total_amount(budget)).sum();

        let (ceiling, over_budget, utilization_percent) = match project.budget_ceiling {
            Some(ceiling) => {
                let utilization = if ceiling.is_zero() {
                    None
                } else {
                    Some((committed / ceiling * Decimal::ONE_HUNDRED).round_dp(2))
                };
                (
                    Some(Money::new(ceiling, project.currency)),
                    Some(committed > ceiling),
                    utilization,
                )
            }
            None => (None, None, None),
        };

        ProjectSummary {
            project_id: project.id,
            committed: Money::new(committed, project.currency),
            ceiling,
            over_budget,
            utilization_percent,
            draft_budgets: drafts.len(),
        }
    }
}
