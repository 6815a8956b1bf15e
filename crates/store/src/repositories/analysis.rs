//! Analysis repository for APU operations.

use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use tracing::debug;

use obra_core::analysis::{
    AnalysisError, AnalysisService, Apu, CreateAnalysisInput,
};
use obra_shared::types::{AnalysisId, ResourceId};
use obra_shared::{AppError, AppResult};

use crate::memory::MemoryStore;

/// Repository for unit price analyses.
pub struct AnalysisRepository<'a> {
    pub(crate) store: &'a MemoryStore,
}

impl AnalysisRepository<'_> {
    /// Create an analysis, snapshotting each item's cost from the catalog.
    ///
    /// # Errors
    ///
    /// Returns validation errors for malformed input, a reference error for
    /// an unknown resource, and a conflict for a duplicate code.
    pub fn create(&self, input: CreateAnalysisInput) -> AppResult<Apu> {
        let apu = AnalysisService::compose(input, |id| self.current_unit_cost(id))?;

        // Reserve the code atomically; losing the race is a conflict.
        match self.store.analysis_codes.entry(apu.code.clone()) {
            Entry::Occupied(_) => {
                return Err(AnalysisError::DuplicateCode(apu.code).into());
            }
            Entry::Vacant(slot) => {
                slot.insert(apu.id);
            }
        }

        debug!(analysis_id = %apu.id, code = %apu.code, items = apu.items.len(), "analysis created");
        self.store.analyses.insert(apu.id, apu.clone());
        Ok(apu)
    }

    /// Fetch an analysis by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn get(&self, id: AnalysisId) -> AppResult<Apu> {
        self.store
            .analyses
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::from(AnalysisError::NotFound(id)))
    }

    /// Append an item with a freshly captured snapshot cost.
    ///
    /// # Errors
    ///
    /// Returns not-found, validation, or reference errors. On error the
    /// analysis is left unchanged.
    pub fn add_item(
        &self,
        id: AnalysisId,
        resource_id: ResourceId,
        quantity: Decimal,
    ) -> AppResult<Apu> {
        let mut entry = self
            .store
            .analyses
            .get_mut(&id)
            .ok_or_else(|| AppError::from(AnalysisError::NotFound(id)))?;
        AnalysisService::add_item(&mut entry, resource_id, quantity, |rid| {
            self.current_unit_cost(rid)
        })?;
        Ok(entry.value().clone())
    }

    /// Remove one item by position.
    ///
    /// # Errors
    ///
    /// Returns not-found or out-of-range errors.
    pub fn remove_item(&self, id: AnalysisId, index: usize) -> AppResult<Apu> {
        let mut entry = self
            .store
            .analyses
            .get_mut(&id)
            .ok_or_else(|| AppError::from(AnalysisError::NotFound(id)))?;
        AnalysisService::remove_item(&mut entry, index)?;
        Ok(entry.value().clone())
    }

    /// Re-snapshot one item's cost from the resource's current price.
    ///
    /// # Errors
    ///
    /// Returns not-found, out-of-range, or reference errors (the resource
    /// may have been deleted since the original capture).
    pub fn recost(&self, id: AnalysisId, index: usize) -> AppResult<Apu> {
        let mut entry = self
            .store
            .analyses
            .get_mut(&id)
            .ok_or_else(|| AppError::from(AnalysisError::NotFound(id)))?;
        let cost = AnalysisService::recost(&mut entry, index, |rid| self.current_unit_cost(rid))?;
        debug!(analysis_id = %id, index, new_cost = %cost, "analysis item recosted");
        Ok(entry.value().clone())
    }

    /// Delete an analysis and release its code.
    ///
    /// Budget items that captured this analysis's total keep their
    /// snapshots.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn delete(&self, id: AnalysisId) -> AppResult<()> {
        let (_, apu) = self
            .store
            .analyses
            .remove(&id)
            .ok_or_else(|| AppError::from(AnalysisError::NotFound(id)))?;
        self.store.analysis_codes.remove(&apu.code);
        debug!(analysis_id = %id, code = %apu.code, "analysis deleted; existing snapshots unaffected");
        Ok(())
    }

    /// The referenced resource's current unit cost, if it exists.
    fn current_unit_cost(&self, id: ResourceId) -> Option<Decimal> {
        self.store.resources.get(&id).map(|entry| entry.unit_cost)
    }
}
