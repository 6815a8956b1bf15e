//! The in-memory store backing all repositories.

use dashmap::DashMap;

use obra_core::analysis::Apu;
use obra_core::catalog::Resource;
use obra_core::project::Project;
use obra_core::version::BudgetLineage;
use obra_shared::types::{AnalysisId, BudgetId, ProjectId, ResourceId};
use obra_shared::EngineConfig;

use crate::repositories::{
    AnalysisRepository, BudgetRepository, ProjectRepository, ResourceRepository,
};

/// Concurrent in-memory store.
///
/// Each collection is a `DashMap`; an entry guard holds the map shard lock,
/// which is what makes the budget version check a compare-and-swap.
///
/// Lock order between collections is fixed to avoid deadlocks: a holder of a
/// `lineages` guard may read `analyses`, and a holder of an `analyses` guard
/// may read `resources` — never the other way around.
pub struct MemoryStore {
    pub(crate) config: EngineConfig,
    pub(crate) resources: DashMap<ResourceId, Resource>,
    pub(crate) analyses: DashMap<AnalysisId, Apu>,
    /// APU code uniqueness index (code -> owner).
    pub(crate) analysis_codes: DashMap<String, AnalysisId>,
    pub(crate) projects: DashMap<ProjectId, Project>,
    pub(crate) lineages: DashMap<BudgetId, BudgetLineage>,
    /// Budget name uniqueness index ((project, name) -> lineage).
    pub(crate) lineage_names: DashMap<(ProjectId, String), BudgetId>,
}

impl MemoryStore {
    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            resources: DashMap::new(),
            analyses: DashMap::new(),
            analysis_codes: DashMap::new(),
            projects: DashMap::new(),
            lineages: DashMap::new(),
            lineage_names: DashMap::new(),
        }
    }

    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The store's configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Repository for catalog resources.
    #[must_use]
    pub const fn resources(&self) -> ResourceRepository<'_> {
        ResourceRepository { store: self }
    }

    /// Repository for unit price analyses.
    #[must_use]
    pub const fn analyses(&self) -> AnalysisRepository<'_> {
        AnalysisRepository { store: self }
    }

    /// Repository for budgets and their version chains.
    #[must_use]
    pub const fn budgets(&self) -> BudgetRepository<'_> {
        BudgetRepository { store: self }
    }

    /// Repository for projects.
    #[must_use]
    pub const fn projects(&self) -> ProjectRepository<'_> {
        ProjectRepository { store: self }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
