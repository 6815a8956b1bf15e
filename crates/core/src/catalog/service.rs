//! Catalog service for resource validation.

use chrono::Utc;
use rust_decimal::Decimal;

use obra_shared::types::{Currency, ResourceId};

use super::error::CatalogError;
use super::types::{CreateResourceInput, Resource, UpdateResourceInput};

/// Catalog service for business logic.
///
/// Validates and builds resource records. An upsert has no side effects
/// beyond the stored record: price changes never trigger a cascading
/// recompute of analyses or budgets that already captured a snapshot.
pub struct CatalogService;

impl CatalogService {
    /// Validate and build a new resource.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName`, `CatalogError::EmptyUnit`, or
    /// `CatalogError::NegativeUnitCost` when the input is malformed.
    pub fn build(
        input: CreateResourceInput,
        default_currency: Currency,
    ) -> Result<Resource, CatalogError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let unit = input.unit.trim();
        if unit.is_empty() {
            return Err(CatalogError::EmptyUnit);
        }
        if input.unit_cost < Decimal::ZERO {
            return Err(CatalogError::NegativeUnitCost);
        }

        let now = Utc::now();
        Ok(Resource {
            id: ResourceId::new(),
            name: name.to_string(),
            description: input.description,
            resource_type: input.resource_type,
            unit: unit.to_string(),
            unit_cost: input.unit_cost,
            currency: input.currency.unwrap_or(default_currency),
            supplier: input.supplier,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch to an existing resource.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Self::build`] when the patch
    /// introduces a malformed field. On error the resource is left unchanged.
    pub fn apply_patch(
        resource: &mut Resource,
        patch: UpdateResourceInput,
    ) -> Result<(), CatalogError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
        }
        if let Some(unit) = &patch.unit {
            if unit.trim().is_empty() {
                return Err(CatalogError::EmptyUnit);
            }
        }
        if let Some(cost) = patch.unit_cost {
            if cost < Decimal::ZERO {
                return Err(CatalogError::NegativeUnitCost);
            }
        }

        if let Some(name) = patch.name {
            resource.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            resource.description = description;
        }
        if let Some(resource_type) = patch.resource_type {
            resource.resource_type = resource_type;
        }
        if let Some(unit) = patch.unit {
            resource.unit = unit.trim().to_string();
        }
        if let Some(cost) = patch.unit_cost {
            resource.unit_cost = cost;
        }
        if let Some(currency) = patch.currency {
            resource.currency = currency;
        }
        if let Some(supplier) = patch.supplier {
            resource.supplier = supplier;
        }
        resource.updated_at = Utc::now();
        Ok(())
    }
}
