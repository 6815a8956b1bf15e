//! Project repository with cascade deletion and rollup reads.

use tracing::{debug, info};

use obra_core::budget::Budget;
use obra_core::project::{
    CreateProjectInput, Project, ProjectError, ProjectService, UpdateProjectInput,
};
use obra_core::rollup::{ProjectSummary, RollupService};
use obra_shared::types::{BudgetId, Principal, ProjectId};
use obra_shared::{AppError, AppResult};

use crate::memory::MemoryStore;

/// Repository for projects.
pub struct ProjectRepository<'a> {
    pub(crate) store: &'a MemoryStore,
}

impl ProjectRepository<'_> {
    /// Create a project owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns validation errors for malformed input.
    pub fn create(&self, input: CreateProjectInput, principal: Principal) -> AppResult<Project> {
        let project = ProjectService::build(
            input,
            principal.user_id,
            self.store.config.default_currency(),
        )?;
        info!(project_id = %project.id, name = %project.name, "project created");
        self.store.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Fetch a project by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn get(&self, id: ProjectId) -> AppResult<Project> {
        self.store
            .projects
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::from(ProjectError::NotFound(id)))
    }

    /// Update a project.
    ///
    /// # Errors
    ///
    /// Returns not-found or validation errors.
    pub fn update(&self, id: ProjectId, patch: UpdateProjectInput) -> AppResult<Project> {
        let mut entry = self
            .store
            .projects
            .get_mut(&id)
            .ok_or_else(|| AppError::from(ProjectError::NotFound(id)))?;
        ProjectService::apply_patch(&mut entry, patch)?;
        Ok(entry.value().clone())
    }

    /// Delete a project and cascade-delete its full budget version chains.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn delete(&self, id: ProjectId) -> AppResult<()> {
        self.store
            .projects
            .remove(&id)
            .ok_or_else(|| AppError::from(ProjectError::NotFound(id)))?;

        let owned: Vec<(ProjectId, String, BudgetId)> = self
            .store
            .lineage_names
            .iter()
            .filter(|entry| entry.key().0 == id)
            .map(|entry| (entry.key().0, entry.key().1.clone(), *entry.value()))
            .collect();
        for (project_id, name, budget_id) in owned {
            self.store.lineages.remove(&budget_id);
            self.store.lineage_names.remove(&(project_id, name));
        }
        debug!(project_id = %id, "project deleted with its budget lineages");
        Ok(())
    }

    /// Summarize the project's committed cost against its ceiling.
    ///
    /// Pure read over the project's current Draft budgets; nothing is
    /// mutated or cached.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the ID is unknown.
    pub fn summarize(&self, id: ProjectId) -> AppResult<ProjectSummary> {
        let project = self.get(id)?;
        let drafts: Vec<Budget> = self
            .store
            .lineages
            .iter()
            .filter(|lineage| lineage.draft().project_id == id)
            .map(|lineage| lineage.draft().clone())
            .collect();
        Ok(RollupService::summarize(&project, &drafts))
    }
}
