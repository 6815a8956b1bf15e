//! Property-based tests for analysis totals and recost isolation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use obra_shared::types::ResourceId;

use super::service::AnalysisService;
use super::types::{AnalysisItem, Apu};

/// Strategy for a non-negative quantity or cost (0.00 to 10,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn item_strategy() -> impl Strategy<Value = AnalysisItem> {
    (non_negative_amount(), non_negative_amount()).prop_map(|(quantity, cost_per_unit)| {
        AnalysisItem {
            resource_id: ResourceId::new(),
            quantity,
            cost_per_unit,
        }
    })
}

fn apu_with(items: Vec<AnalysisItem>) -> Apu {
    let now = chrono::Utc::now();
    Apu {
        id: obra_shared::types::AnalysisId::new(),
        code: "APU-PROP".to_string(),
        description: "property fixture".to_string(),
        unit: "sqm".to_string(),
        items,
        project_id: None,
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `total_cost` always equals the fold of `quantity * cost_per_unit`.
    #[test]
    fn prop_total_equals_fold(items in prop::collection::vec(item_strategy(), 0..12)) {
        let apu = apu_with(items.clone());
        let expected: Decimal = items.iter().map(|i| i.quantity * i.cost_per_unit).sum();
        prop_assert_eq!(AnalysisService::total_cost(&apu), expected);
        // Idempotent re-read.
        prop_assert_eq!(AnalysisService::total_cost(&apu), expected);
    }

    /// Recosting one item never changes any other item's snapshot.
    #[test]
    fn prop_recost_touches_only_target(
        items in prop::collection::vec(item_strategy(), 1..12),
        new_cost in non_negative_amount(),
    ) {
        let mut apu = apu_with(items.clone());
        let target = items.len() - 1;
        AnalysisService::recost(&mut apu, target, |_| Some(new_cost)).unwrap();

        prop_assert_eq!(apu.items[target].cost_per_unit, new_cost);
        for (index, original) in items.iter().enumerate().take(target) {
            prop_assert_eq!(apu.items[index].cost_per_unit, original.cost_per_unit);
            prop_assert_eq!(apu.items[index].quantity, original.quantity);
        }
    }
}
