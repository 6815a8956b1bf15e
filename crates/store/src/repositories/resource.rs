//! Resource repository for catalog operations.

use tracing::debug;

use obra_core::catalog::{
    CatalogError, CatalogService, CreateResourceInput, Resource, ResourceType,
    UpdateResourceInput,
};
use obra_shared::types::{PageRequest, PageResponse, ResourceId};
use obra_shared::{AppError, AppResult};

use crate::memory::MemoryStore;

/// Repository for catalog resources.
pub struct ResourceRepository<'a> {
    pub(crate) store: &'a MemoryStore,
}

impl ResourceRepository<'_> {
    /// Create a resource.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input.
    pub fn create(&self, input: CreateResourceInput) -> AppResult<Resource> {
        let resource = CatalogService::build(input, self.store.config.default_currency())?;
        debug!(resource_id = %resource.id, name = %resource.name, "resource created");
        self.store.resources.insert(resource.id, resource.clone());
        Ok(resource)
    }

    /// Update a resource.
    ///
    /// A price change has no side effects beyond the stored record: analyses
    /// and budgets that captured the old price keep their snapshots.
    ///
    /// # Errors
    ///
    /// Returns not-found or validation errors.
    pub fn update(&self, id: ResourceId, patch: UpdateResourceInput) -> AppResult<Resource> {
        let mut entry = self
            .store
            .resources
            .get_mut(&id)
            .ok_or_else(|| AppError::from(CatalogError::NotFound(id)))?;
        CatalogService::apply_patch(&mut entry, patch)?;
        debug!(resource_id = %id, unit_cost = %entry.unit_cost, "resource updated");
        Ok(entry.value().clone())
    }

    /// Create or update a resource in one call.
    ///
    /// # Errors
    ///
    /// Returns not-found (for an update to an unknown ID) or validation
    /// errors.
    pub fn upsert(&self, id: Option<ResourceId>, input: CreateResourceInput) -> AppResult<Resource> {
        match id {
            None => self.create(input),
            Some(id) => self.update(
                id,
                UpdateResourceInput {
                    name: Some(input.name),
                    description: Some(input.description),
                    resource_type: Some(input.resource_type),
                    unit: Some(input.unit),
                    unit_cost: Some(input.unit_cost),
                    currency: input.currency,
                    supplier: Some(input.supplier),
                },
            ),
        }
    }

    /// Fetch a resource by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn get(&self, id: ResourceId) -> AppResult<Resource> {
        self.store
            .resources
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::from(CatalogError::NotFound(id)))
    }

    /// List resources, optionally filtered by type, ordered by name.
    #[must_use]
    pub fn list(
        &self,
        page: PageRequest,
        resource_type: Option<ResourceType>,
    ) -> PageResponse<Resource> {
        let page = page.clamped(self.store.config.pagination.max_per_page);
        let mut all: Vec<Resource> = self
            .store
            .resources
            .iter()
            .filter(|entry| resource_type.is_none_or(|ty| entry.resource_type == ty))
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.0.cmp(&b.id.0)));

        let total = all.len() as u64;
        let data: Vec<Resource> = all
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        PageResponse::new(data, page, total)
    }

    /// Delete a resource.
    ///
    /// Snapshots already captured from this resource are value copies and
    /// stay intact.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn delete(&self, id: ResourceId) -> AppResult<()> {
        self.store
            .resources
            .remove(&id)
            .ok_or_else(|| AppError::from(CatalogError::NotFound(id)))?;
        debug!(resource_id = %id, "resource deleted; existing snapshots unaffected");
        Ok(())
    }
}
