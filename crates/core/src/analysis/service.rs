//! Analysis service: APU composition with snapshot cost capture.
//!
//! Storage is injected as lookup closures so the service stays free of I/O.
//! Each lookup returns the resource's *current* unit cost; the service
//! freezes that value into the item at capture time.

use chrono::Utc;
use rust_decimal::Decimal;

use obra_shared::types::{AnalysisId, ResourceId};

use super::error::AnalysisError;
use super::types::{AnalysisItem, Apu, CreateAnalysisInput};

/// Analysis service for APU composition.
pub struct AnalysisService;

impl AnalysisService {
    /// Compose a new analysis, snapshotting every item's cost.
    ///
    /// Either every item resolves and validates, or no analysis is produced:
    /// there is no partially composed result.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyCode` / `EmptyDescription` / `EmptyUnit`
    /// on blank header fields, `NegativeQuantity` on a negative item
    /// quantity, and `UnknownResource` when the lookup cannot resolve a
    /// referenced resource. Code uniqueness is enforced by the store.
    pub fn compose<R>(input: CreateAnalysisInput, resource_cost: R) -> Result<Apu, AnalysisError>
    where
        R: Fn(ResourceId) -> Option<Decimal>,
    {
        let code = input.code.trim();
        if code.is_empty() {
            return Err(AnalysisError::EmptyCode);
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(AnalysisError::EmptyDescription);
        }
        let unit = input.unit.trim();
        if unit.is_empty() {
            return Err(AnalysisError::EmptyUnit);
        }

        let mut items = Vec::with_capacity(input.items.len());
        for (index, item) in input.items.iter().enumerate() {
            items.push(Self::snapshot_item(
                item.resource_id,
                item.quantity,
                index,
                &resource_cost,
            )?);
        }

        let now = Utc::now();
        Ok(Apu {
            id: AnalysisId::new(),
            code: code.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
            items,
            project_id: input.project_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Append a new item with a freshly captured snapshot cost.
    ///
    /// Existing items' snapshots are not touched. On error the analysis is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NegativeQuantity` or `UnknownResource`.
    pub fn add_item<R>(
        apu: &mut Apu,
        resource_id: ResourceId,
        quantity: Decimal,
        resource_cost: R,
    ) -> Result<(), AnalysisError>
    where
        R: Fn(ResourceId) -> Option<Decimal>,
    {
        let item = Self::snapshot_item(resource_id, quantity, apu.items.len(), &resource_cost)?;
        apu.items.push(item);
        apu.updated_at = Utc::now();
        Ok(())
    }

    /// Remove one item by position.
    ///
    /// # Errors
    ///
    /// Returns `ItemOutOfRange` when `index` does not address an item.
    pub fn remove_item(apu: &mut Apu, index: usize) -> Result<AnalysisItem, AnalysisError> {
        if index >= apu.items.len() {
            return Err(AnalysisError::ItemOutOfRange {
                index,
                len: apu.items.len(),
            });
        }
        let removed = apu.items.remove(index);
        apu.updated_at = Utc::now();
        Ok(removed)
    }

    /// Re-snapshot one item's cost from the resource's current price.
    ///
    /// This is the only sanctioned way catalog price changes propagate into
    /// an analysis. Not calling it leaves stale-but-intentional pricing,
    /// which is the documented behavior.
    ///
    /// # Errors
    ///
    /// Returns `ItemOutOfRange` or `UnknownResource` (the resource may have
    /// been deleted since the original capture).
    pub fn recost<R>(apu: &mut Apu, index: usize, resource_cost: R) -> Result<Decimal, AnalysisError>
    where
        R: Fn(ResourceId) -> Option<Decimal>,
    {
        let len = apu.items.len();
        let item = apu
            .items
            .get_mut(index)
            .ok_or(AnalysisError::ItemOutOfRange { index, len })?;
        let cost =
            resource_cost(item.resource_id).ok_or(AnalysisError::UnknownResource(item.resource_id))?;
        item.cost_per_unit = cost;
        apu.updated_at = Utc::now();
        Ok(cost)
    }

    /// Total cost of the analysis: the sum of `quantity * cost_per_unit`
    /// over current items. Recomputed on every call, never cached.
    #[must_use]
    pub fn total_cost(apu: &Apu) -> Decimal {
        apu.items.iter().map(AnalysisItem::total).sum()
    }

    fn snapshot_item<R>(
        resource_id: ResourceId,
        quantity: Decimal,
        index: usize,
        resource_cost: &R,
    ) -> Result<AnalysisItem, AnalysisError>
    where
        R: Fn(ResourceId) -> Option<Decimal>,
    {
        if quantity < Decimal::ZERO {
            return Err(AnalysisError::NegativeQuantity { index });
        }
        let cost_per_unit =
            resource_cost(resource_id).ok_or(AnalysisError::UnknownResource(resource_id))?;
        Ok(AnalysisItem {
            resource_id,
            quantity,
            cost_per_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::AnalysisItemInput;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn wall_input(items: Vec<AnalysisItemInput>) -> CreateAnalysisInput {
        CreateAnalysisInput {
            code: "APU-001".to_string(),
            description: "Brick wall, 15cm".to_string(),
            unit: "sqm".to_string(),
            items,
            project_id: None,
        }
    }

    fn catalog_with(prices: &[(ResourceId, Decimal)]) -> HashMap<ResourceId, Decimal> {
        prices.iter().copied().collect()
    }

    #[test]
    fn test_compose_snapshots_costs() {
        let mason = ResourceId::new();
        let catalog = catalog_with(&[(mason, dec!(10))]);

        let apu = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: mason,
                quantity: dec!(5),
            }]),
            |id| catalog.get(&id).copied(),
        )
        .unwrap();

        assert_eq!(apu.items.len(), 1);
        assert_eq!(apu.items[0].cost_per_unit, dec!(10));
        assert_eq!(AnalysisService::total_cost(&apu), dec!(50));
    }

    #[test]
    fn test_price_change_does_not_move_snapshot() {
        // Scenario: resource at 10/hour, item quantity 5 => total 50.
        // Raising the catalog price to 20 leaves the analysis at 50.
        let mason = ResourceId::new();
        let mut catalog = catalog_with(&[(mason, dec!(10))]);

        let mut apu = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: mason,
                quantity: dec!(5),
            }]),
            |id| catalog.get(&id).copied(),
        )
        .unwrap();
        assert_eq!(AnalysisService::total_cost(&apu), dec!(50));

        catalog.insert(mason, dec!(20));
        assert_eq!(AnalysisService::total_cost(&apu), dec!(50));

        // Explicit recost is the only propagation path.
        let new_cost = AnalysisService::recost(&mut apu, 0, |id| catalog.get(&id).copied()).unwrap();
        assert_eq!(new_cost, dec!(20));
        assert_eq!(AnalysisService::total_cost(&apu), dec!(100));
    }

    #[test]
    fn test_add_item_leaves_existing_snapshots() {
        let mason = ResourceId::new();
        let cement = ResourceId::new();
        let mut catalog = catalog_with(&[(mason, dec!(10)), (cement, dec!(4))]);

        let mut apu = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: mason,
                quantity: dec!(5),
            }]),
            |id| catalog.get(&id).copied(),
        )
        .unwrap();

        catalog.insert(mason, dec!(99));
        AnalysisService::add_item(&mut apu, cement, dec!(2), |id| catalog.get(&id).copied())
            .unwrap();

        assert_eq!(apu.items[0].cost_per_unit, dec!(10));
        assert_eq!(apu.items[1].cost_per_unit, dec!(4));
        assert_eq!(AnalysisService::total_cost(&apu), dec!(58));
    }

    #[test]
    fn test_compose_rejects_negative_quantity() {
        let mason = ResourceId::new();
        let catalog = catalog_with(&[(mason, dec!(10))]);

        let result = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: mason,
                quantity: dec!(-1),
            }]),
            |id| catalog.get(&id).copied(),
        );
        assert!(matches!(
            result,
            Err(AnalysisError::NegativeQuantity { index: 0 })
        ));
    }

    #[test]
    fn test_compose_rejects_unknown_resource() {
        let ghost = ResourceId::new();
        let result = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: ghost,
                quantity: dec!(1),
            }]),
            |_| None,
        );
        assert!(matches!(result, Err(AnalysisError::UnknownResource(id)) if id == ghost));
    }

    #[test]
    fn test_compose_rejects_blank_header_fields() {
        let mut input = wall_input(vec![]);
        input.code = "  ".to_string();
        assert!(matches!(
            AnalysisService::compose(input, |_| None),
            Err(AnalysisError::EmptyCode)
        ));

        let mut input = wall_input(vec![]);
        input.unit = String::new();
        assert!(matches!(
            AnalysisService::compose(input, |_| None),
            Err(AnalysisError::EmptyUnit)
        ));

        let mut input = wall_input(vec![]);
        input.description = " ".to_string();
        assert!(matches!(
            AnalysisService::compose(input, |_| None),
            Err(AnalysisError::EmptyDescription)
        ));
    }

    #[test]
    fn test_add_item_rejects_without_mutating() {
        let mason = ResourceId::new();
        let catalog = catalog_with(&[(mason, dec!(10))]);

        let mut apu = AnalysisService::compose(
            wall_input(vec![AnalysisItemInput {
                resource_id: mason,
                quantity: dec!(5),
            }]),
            |id| catalog.get(&id).copied(),
        )
        .unwrap();

        let result =
            AnalysisService::add_item(&mut apu, ResourceId::new(), dec!(1), |id| {
                catalog.get(&id).copied()
            });
        assert!(matches!(result, Err(AnalysisError::UnknownResource(_))));
        assert_eq!(apu.items.len(), 1);
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut apu = AnalysisService::compose(wall_input(vec![]), |_| None).unwrap();
        assert!(matches!(
            AnalysisService::remove_item(&mut apu, 0),
            Err(AnalysisError::ItemOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_remove_item_recomputes_total() {
        let mason = ResourceId::new();
        let cement = ResourceId::new();
        let catalog = catalog_with(&[(mason, dec!(10)), (cement, dec!(4))]);

        let mut apu = AnalysisService::compose(
            wall_input(vec![
                AnalysisItemInput {
                    resource_id: mason,
                    quantity: dec!(5),
                },
                AnalysisItemInput {
                    resource_id: cement,
                    quantity: dec!(2),
                },
            ]),
            |id| catalog.get(&id).copied(),
        )
        .unwrap();
        assert_eq!(AnalysisService::total_cost(&apu), dec!(58));

        let removed = AnalysisService::remove_item(&mut apu, 0).unwrap();
        assert_eq!(removed.resource_id, mason);
        assert_eq!(AnalysisService::total_cost(&apu), dec!(8));
    }

    #[test]
    fn test_empty_analysis_totals_zero() {
        let apu = AnalysisService::compose(wall_input(vec![]), |_| None).unwrap();
        assert_eq!(AnalysisService::total_cost(&apu), Decimal::ZERO);
    }
}
