//! Property-based tests for budget totals and revision commits.

use proptest::prelude::*;
use rust_decimal::Decimal;

use obra_shared::types::{AnalysisId, BudgetId, ProjectId, UserId};

use crate::version::service::VersionService;
use crate::version::types::{BudgetLineage, VersionState};

use super::service::BudgetService;
use super::types::{Budget, BudgetItem, CostSource};

/// Strategy for a non-negative quantity or cost (0.00 to 10,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn item_strategy() -> impl Strategy<Value = BudgetItem> {
    (non_negative_amount(), non_negative_amount(), any::<bool>()).prop_map(
        |(quantity, unit_cost, direct)| BudgetItem {
            source: if direct {
                CostSource::Direct
            } else {
                CostSource::Analysis {
                    apu_id: AnalysisId::new(),
                }
            },
            quantity,
            unit_cost,
            description_override: None,
        },
    )
}

fn budget_with(items: Vec<BudgetItem>) -> Budget {
    let now = chrono::Utc::now();
    Budget {
        id: BudgetId::new(),
        project_id: ProjectId::new(),
        name: "Prop Budget".to_string(),
        version: 1,
        state: VersionState::Draft,
        items,
        created_by: UserId::new(),
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `total_amount` always equals the fold of `quantity * unit_cost`.
    #[test]
    fn prop_total_equals_fold(items in prop::collection::vec(item_strategy(), 0..12)) {
        let budget = budget_with(items.clone());
        let expected: Decimal = items.iter().map(|i| i.quantity * i.unit_cost).sum();
        prop_assert_eq!(BudgetService::total_amount(&budget), expected);
    }

    /// A revision commit preserves every sealed version's items and total.
    #[test]
    fn prop_commit_preserves_totals(
        items in prop::collection::vec(item_strategy(), 0..8),
        commits in 1u32..5,
    ) {
        let budget = budget_with(items);
        let expected = BudgetService::total_amount(&budget);
        let mut lineage = BudgetLineage::new(budget);

        for observed in 1..=commits {
            VersionService::commit_revision(&mut lineage, observed).unwrap();
        }

        prop_assert_eq!(lineage.frozen().len() as u32, commits);
        for sealed in lineage.frozen() {
            prop_assert!(sealed.state.is_frozen());
            prop_assert_eq!(BudgetService::total_amount(sealed), expected);
        }
        prop_assert_eq!(BudgetService::total_amount(lineage.draft()), expected);
        prop_assert_eq!(lineage.draft().version, commits + 1);
    }
}
