//! Budget repository: lineage storage with version-guarded mutations.
//!
//! Every mutation carries the version the caller last observed. The check
//! runs inside the lineage's entry guard, so at most one writer can act on
//! an observed version: this is the store's compare-and-swap primitive.

use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use obra_core::analysis::AnalysisService;
use obra_core::budget::{
    Budget, BudgetError, BudgetItemInput, BudgetService, CreateBudgetInput, UpdateBudgetItemInput,
};
use obra_core::version::{BudgetLineage, VersionError, VersionService};
use obra_shared::types::{AnalysisId, BudgetId, Principal, ProjectId};
use obra_shared::{AppError, AppResult};

use crate::memory::MemoryStore;

/// Repository for budgets and their version chains.
pub struct BudgetRepository<'a> {
    pub(crate) store: &'a MemoryStore,
}

impl BudgetRepository<'_> {
    /// Create a budget as Draft version 1 of a new lineage.
    ///
    /// Omitting `name` applies the configured default. The creating user is
    /// stamped from the caller's principal.
    ///
    /// # Errors
    ///
    /// Returns a reference error for an unknown project or APU, a conflict
    /// when the name is already used by a live lineage of the project, and
    /// validation errors for malformed lines.
    pub fn create(
        &self,
        project_id: ProjectId,
        name: Option<String>,
        items: Vec<BudgetItemInput>,
        principal: Principal,
    ) -> AppResult<Budget> {
        if !self.store.projects.contains_key(&project_id) {
            return Err(AppError::Reference(format!(
                "project {project_id} does not exist"
            )));
        }

        let name = name.unwrap_or_else(|| self.store.config.defaults.budget_name.clone());
        let budget = BudgetService::compose(
            CreateBudgetInput {
                project_id,
                name,
                items,
                created_by: principal.user_id,
            },
            |id| self.current_apu_total(id),
        )?;

        // Reserve the (project, name) pair atomically.
        match self
            .store
            .lineage_names
            .entry((project_id, budget.name.clone()))
        {
            Entry::Occupied(_) => {
                return Err(BudgetError::DuplicateName(budget.name).into());
            }
            Entry::Vacant(slot) => {
                slot.insert(budget.id);
            }
        }

        info!(budget_id = %budget.id, project_id = %project_id, name = %budget.name, "budget created");
        self.store
            .lineages
            .insert(budget.id, BudgetLineage::new(budget.clone()));
        Ok(budget)
    }

    /// Fetch the current Draft of a lineage.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn get(&self, id: BudgetId) -> AppResult<Budget> {
        self.store
            .lineages
            .get(&id)
            .map(|lineage| lineage.draft().clone())
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))
    }

    /// Fetch one version of a lineage by number.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown lineage or version number.
    pub fn get_version(&self, id: BudgetId, version: u32) -> AppResult<Budget> {
        let lineage = self
            .store
            .lineages
            .get(&id)
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))?;
        let budget = VersionService::get_version(&lineage, version)?;
        Ok(budget.clone())
    }

    /// All versions of a lineage, ascending, Draft last.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn list_versions(&self, id: BudgetId) -> AppResult<Vec<Budget>> {
        let lineage = self
            .store
            .lineages
            .get(&id)
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))?;
        Ok(lineage.versions().cloned().collect())
    }

    /// Append a line to the Draft, snapshotting from the referenced APU.
    ///
    /// # Errors
    ///
    /// Returns immutable-version or concurrency errors for a bad observed
    /// version, plus the validation and reference errors of composition.
    /// On error the budget is left unchanged.
    pub fn add_item(
        &self,
        id: BudgetId,
        observed_version: u32,
        input: BudgetItemInput,
    ) -> AppResult<Budget> {
        self.mutate_draft(id, observed_version, |draft| {
            BudgetService::add_item(draft, input, |apu_id| self.current_apu_total(apu_id))
        })
    }

    /// Remove one line from the Draft by position.
    ///
    /// # Errors
    ///
    /// Same guard errors as [`Self::add_item`], plus out-of-range.
    pub fn remove_item(
        &self,
        id: BudgetId,
        observed_version: u32,
        index: usize,
    ) -> AppResult<Budget> {
        self.mutate_draft(id, observed_version, |draft| {
            BudgetService::remove_item(draft, index).map(|_| ())
        })
    }

    /// Update one line's quantity or description.
    ///
    /// # Errors
    ///
    /// Same guard errors as [`Self::add_item`], plus out-of-range and
    /// validation errors.
    pub fn update_item(
        &self,
        id: BudgetId,
        observed_version: u32,
        index: usize,
        patch: UpdateBudgetItemInput,
    ) -> AppResult<Budget> {
        self.mutate_draft(id, observed_version, |draft| {
            BudgetService::update_item(draft, index, patch)
        })
    }

    /// Seal the current Draft and open the next version.
    ///
    /// Returns the new Draft. Of two concurrent commits presenting the same
    /// observed version, exactly one wins; the loser must re-read and retry.
    ///
    /// # Errors
    ///
    /// Returns a concurrency conflict for a stale observed version.
    pub fn commit_revision(&self, id: BudgetId, observed_version: u32) -> AppResult<Budget> {
        let mut lineage = self
            .store
            .lineages
            .get_mut(&id)
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))?;
        let new_version = VersionService::commit_revision(&mut lineage, observed_version)
            .map_err(|err| log_version_conflict(id, err))?;
        info!(budget_id = %id, new_version, "budget revision committed");
        Ok(lineage.draft().clone())
    }

    /// Delete a lineage and release its name.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn delete(&self, id: BudgetId) -> AppResult<()> {
        let (_, lineage) = self
            .store
            .lineages
            .remove(&id)
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))?;
        let draft = lineage.draft();
        self.store
            .lineage_names
            .remove(&(draft.project_id, draft.name.clone()));
        debug!(budget_id = %id, versions = lineage.len(), "budget lineage deleted");
        Ok(())
    }

    /// Run an item mutation inside the lineage's entry guard.
    ///
    /// The observed-version check and the mutation happen under one lock,
    /// which is what makes this a compare-and-swap: a competing writer either
    /// sees the mutation completed or runs first.
    fn mutate_draft(
        &self,
        id: BudgetId,
        observed_version: u32,
        mutation: impl FnOnce(&mut Budget) -> Result<(), BudgetError>,
    ) -> AppResult<Budget> {
        let mut lineage = self
            .store
            .lineages
            .get_mut(&id)
            .ok_or_else(|| AppError::from(BudgetError::NotFound(id)))?;
        VersionService::authorize_mutation(&lineage, observed_version)
            .map_err(|err| log_version_conflict(id, err))?;
        mutation(lineage.draft_mut())?;
        Ok(lineage.draft().clone())
    }

    /// The referenced analysis's current total cost, if it exists.
    fn current_apu_total(&self, id: AnalysisId) -> Option<Decimal> {
        self.store
            .analyses
            .get(&id)
            .map(|apu| AnalysisService::total_cost(&apu))
    }
}

fn log_version_conflict(id: BudgetId, err: VersionError) -> AppError {
    if matches!(err, VersionError::StaleVersion { .. }) {
        warn!(budget_id = %id, %err, "stale version; caller must re-read and retry");
    }
    err.into()
}
