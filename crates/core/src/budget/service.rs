//! Budget service: aggregation of APU snapshots into budget versions.
//!
//! As in the analysis layer, storage is injected as a lookup closure that
//! returns the referenced APU's *current* total cost; the service freezes
//! that value into the line at capture time.

use chrono::Utc;
use rust_decimal::Decimal;

use obra_shared::types::{AnalysisId, BudgetId};

use crate::version::service::VersionService;
use crate::version::types::VersionState;

use super::error::BudgetError;
use super::types::{Budget, BudgetItem, BudgetItemInput, CostSource, CreateBudgetInput, UpdateBudgetItemInput};

/// Budget service for composition and item mutations.
pub struct BudgetService;

impl BudgetService {
    /// Compose a new budget as the Draft at version 1.
    ///
    /// Either every line validates and resolves, or no budget is produced.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyName`, `NegativeQuantity`,
    /// `NegativeUnitCost`, `EmptyDirectDescription`, or `UnknownAnalysis`.
    /// Project existence and name uniqueness are enforced by the store.
    pub fn compose<A>(input: CreateBudgetInput, apu_total: A) -> Result<Budget, BudgetError>
    where
        A: Fn(AnalysisId) -> Option<Decimal>,
    {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(BudgetError::EmptyName);
        }

        let mut items = Vec::with_capacity(input.items.len());
        for (index, item) in input.items.into_iter().enumerate() {
            items.push(Self::snapshot_item(item, index, &apu_total)?);
        }

        let now = Utc::now();
        Ok(Budget {
            id: BudgetId::new(),
            project_id: input.project_id,
            name: name.to_string(),
            version: 1,
            state: VersionState::Draft,
            items,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Append a line with a freshly captured snapshot cost.
    ///
    /// On error the budget is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::ImmutableVersion` (via `BudgetError::Version`)
    /// on a frozen version, plus the same validation and reference errors as
    /// [`Self::compose`].
    pub fn add_item<A>(
        budget: &mut Budget,
        input: BudgetItemInput,
        apu_total: A,
    ) -> Result<(), BudgetError>
    where
        A: Fn(AnalysisId) -> Option<Decimal>,
    {
        VersionService::ensure_draft(budget)?;
        let item = Self::snapshot_item(input, budget.items.len(), &apu_total)?;
        budget.items.push(item);
        budget.updated_at = Utc::now();
        Ok(())
    }

    /// Remove one line by position.
    ///
    /// Removing the last line is permitted; an empty budget is valid with
    /// a total of zero.
    ///
    /// # Errors
    ///
    /// Returns `ImmutableVersion` on a frozen version or `ItemOutOfRange`.
    pub fn remove_item(budget: &mut Budget, index: usize) -> Result<BudgetItem, BudgetError> {
        VersionService::ensure_draft(budget)?;
        if index >= budget.items.len() {
            return Err(BudgetError::ItemOutOfRange {
                index,
                len: budget.items.len(),
            });
        }
        let removed = budget.items.remove(index);
        budget.updated_at = Utc::now();
        Ok(removed)
    }

    /// Update one line's quantity or description.
    ///
    /// The line's snapshot `unit_cost` is never touched here.
    ///
    /// # Errors
    ///
    /// Returns `ImmutableVersion`, `ItemOutOfRange`, or `NegativeQuantity`.
    pub fn update_item(
        budget: &mut Budget,
        index: usize,
        patch: UpdateBudgetItemInput,
    ) -> Result<(), BudgetError> {
        VersionService::ensure_draft(budget)?;
        let len = budget.items.len();
        let item = budget
            .items
            .get_mut(index)
            .ok_or(BudgetError::ItemOutOfRange { index, len })?;

        if let Some(quantity) = patch.quantity {
            if quantity < Decimal::ZERO {
                return Err(BudgetError::NegativeQuantity { index });
            }
            item.quantity = quantity;
        }
        if let Some(description_override) = patch.description_override {
            item.description_override = description_override;
        }
        budget.updated_at = Utc::now();
        Ok(())
    }

    /// Total amount of the budget: the sum of `quantity * unit_cost` over
    /// current items. Recomputed on every call, never cached.
    #[must_use]
    pub fn total_amount(budget: &Budget) -> Decimal {
        budget.items.iter().map(BudgetItem::total).sum()
    }

    fn snapshot_item<A>(
        input: BudgetItemInput,
        index: usize,
        apu_total: &A,
    ) -> Result<BudgetItem, BudgetError>
    where
        A: Fn(AnalysisId) -> Option<Decimal>,
    {
        match input {
            BudgetItemInput::Analysis {
                apu_id,
                quantity,
                description_override,
            } => {
                if quantity < Decimal::ZERO {
                    return Err(BudgetError::NegativeQuantity { index });
                }
                let unit_cost = apu_total(apu_id).ok_or(BudgetError::UnknownAnalysis(apu_id))?;
                Ok(BudgetItem {
                    source: CostSource::Analysis { apu_id },
                    quantity,
                    unit_cost,
                    description_override,
                })
            }
            BudgetItemInput::Direct {
                description,
                quantity,
                unit_cost,
            } => {
                if quantity < Decimal::ZERO {
                    return Err(BudgetError::NegativeQuantity { index });
                }
                if unit_cost < Decimal::ZERO {
                    return Err(BudgetError::NegativeUnitCost { index });
                }
                let description = description.trim();
                if description.is_empty() {
                    return Err(BudgetError::EmptyDirectDescription { index });
                }
                Ok(BudgetItem {
                    source: CostSource::Direct,
                    quantity,
                    unit_cost,
                    description_override: Some(description.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obra_shared::types::{ProjectId, UserId};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn budget_input(items: Vec<BudgetItemInput>) -> CreateBudgetInput {
        CreateBudgetInput {
            project_id: ProjectId::new(),
            name: "Phase 1".to_string(),
            items,
            created_by: UserId::new(),
        }
    }

    fn apu_totals(entries: &[(AnalysisId, Decimal)]) -> HashMap<AnalysisId, Decimal> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_compose_snapshots_apu_totals() {
        // Scenario: APU totalling 50, quantity 2 => budget total 100.
        let wall = AnalysisId::new();
        let totals = apu_totals(&[(wall, dec!(50))]);

        let budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Analysis {
                apu_id: wall,
                quantity: dec!(2),
                description_override: None,
            }]),
            |id| totals.get(&id).copied(),
        )
        .unwrap();

        assert_eq!(budget.version, 1);
        assert!(budget.state.is_draft());
        assert_eq!(budget.items[0].unit_cost, dec!(50));
        assert_eq!(BudgetService::total_amount(&budget), dec!(100));
    }

    #[test]
    fn test_apu_edits_do_not_move_budget_snapshot() {
        let wall = AnalysisId::new();
        let mut totals = apu_totals(&[(wall, dec!(50))]);

        let budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Analysis {
                apu_id: wall,
                quantity: dec!(2),
                description_override: None,
            }]),
            |id| totals.get(&id).copied(),
        )
        .unwrap();

        totals.insert(wall, dec!(100));
        assert_eq!(BudgetService::total_amount(&budget), dec!(100));
        assert_eq!(budget.items[0].unit_cost, dec!(50));
    }

    #[test]
    fn test_direct_line() {
        let budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Direct {
                description: "Site mobilization".to_string(),
                quantity: dec!(1),
                unit_cost: dec!(1500),
            }]),
            |_| None,
        )
        .unwrap();

        assert_eq!(budget.items[0].source, CostSource::Direct);
        assert_eq!(
            budget.items[0].description_override.as_deref(),
            Some("Site mobilization")
        );
        assert_eq!(BudgetService::total_amount(&budget), dec!(1500));
    }

    #[test]
    fn test_compose_rejects_blank_name() {
        let mut input = budget_input(vec![]);
        input.name = "  ".to_string();
        assert!(matches!(
            BudgetService::compose(input, |_| None),
            Err(BudgetError::EmptyName)
        ));
    }

    #[test]
    fn test_compose_rejects_unknown_analysis() {
        let ghost = AnalysisId::new();
        let result = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Analysis {
                apu_id: ghost,
                quantity: dec!(1),
                description_override: None,
            }]),
            |_| None,
        );
        assert!(matches!(result, Err(BudgetError::UnknownAnalysis(id)) if id == ghost));
    }

    #[test]
    fn test_compose_rejects_negative_inputs() {
        let result = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Direct {
                description: "x".to_string(),
                quantity: dec!(-1),
                unit_cost: dec!(1),
            }]),
            |_| None,
        );
        assert!(matches!(
            result,
            Err(BudgetError::NegativeQuantity { index: 0 })
        ));

        let result = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Direct {
                description: "x".to_string(),
                quantity: dec!(1),
                unit_cost: dec!(-1),
            }]),
            |_| None,
        );
        assert!(matches!(
            result,
            Err(BudgetError::NegativeUnitCost { index: 0 })
        ));
    }

    #[test]
    fn test_add_item_rejects_unknown_analysis_without_mutating() {
        let mut budget = BudgetService::compose(budget_input(vec![]), |_| None).unwrap();
        let result = BudgetService::add_item(
            &mut budget,
            BudgetItemInput::Analysis {
                apu_id: AnalysisId::new(),
                quantity: dec!(1),
                description_override: None,
            },
            |_| None,
        );
        assert!(matches!(result, Err(BudgetError::UnknownAnalysis(_))));
        assert!(budget.items.is_empty());
    }

    #[test]
    fn test_mutations_reject_frozen_version() {
        let mut budget = BudgetService::compose(budget_input(vec![]), |_| None).unwrap();
        budget.state = VersionState::Frozen;

        let add = BudgetService::add_item(
            &mut budget,
            BudgetItemInput::Direct {
                description: "x".to_string(),
                quantity: dec!(1),
                unit_cost: dec!(1),
            },
            |_| None,
        );
        assert!(matches!(add, Err(BudgetError::Version(_))));
        assert!(matches!(
            BudgetService::remove_item(&mut budget, 0),
            Err(BudgetError::Version(_))
        ));
        assert!(matches!(
            BudgetService::update_item(&mut budget, 0, UpdateBudgetItemInput::default()),
            Err(BudgetError::Version(_))
        ));
        assert!(budget.items.is_empty());
    }

    #[test]
    fn test_remove_last_item_leaves_valid_empty_budget() {
        let mut budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Direct {
                description: "Fencing".to_string(),
                quantity: dec!(3),
                unit_cost: dec!(80),
            }]),
            |_| None,
        )
        .unwrap();

        BudgetService::remove_item(&mut budget, 0).unwrap();
        assert!(budget.items.is_empty());
        assert_eq!(BudgetService::total_amount(&budget), Decimal::ZERO);
    }

    #[test]
    fn test_update_item_changes_quantity_not_snapshot() {
        let wall = AnalysisId::new();
        let totals = apu_totals(&[(wall, dec!(50))]);
        let mut budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Analysis {
                apu_id: wall,
                quantity: dec!(2),
                description_override: None,
            }]),
            |id| totals.get(&id).copied(),
        )
        .unwrap();

        BudgetService::update_item(
            &mut budget,
            0,
            UpdateBudgetItemInput {
                quantity: Some(dec!(5)),
                description_override: Some(Some("East wing walls".to_string())),
            },
        )
        .unwrap();

        assert_eq!(budget.items[0].quantity, dec!(5));
        assert_eq!(budget.items[0].unit_cost, dec!(50));
        assert_eq!(BudgetService::total_amount(&budget), dec!(250));
    }

    #[test]
    fn test_update_item_rejects_negative_quantity() {
        let mut budget = BudgetService::compose(
            budget_input(vec![BudgetItemInput::Direct {
                description: "Fencing".to_string(),
                quantity: dec!(3),
                unit_cost: dec!(80),
            }]),
            |_| None,
        )
        .unwrap();

        let result = BudgetService::update_item(
            &mut budget,
            0,
            UpdateBudgetItemInput {
                quantity: Some(dec!(-3)),
                description_override: None,
            },
        );
        assert!(matches!(
            result,
            Err(BudgetError::NegativeQuantity { index: 0 })
        ));
        assert_eq!(budget.items[0].quantity, dec!(3));
    }
}
