//! In-memory storage collaborator for the Obra engine.
//!
//! Provides create/read/update/delete by identity for each entity type plus
//! the atomic compare-and-swap primitive keyed on a budget lineage that the
//! core's optimistic concurrency requires. All validation and snapshot
//! capture is delegated to `obra-core`; this crate only adds identity
//! indexes, per-entry locking, and error mapping.

pub mod memory;
pub mod repositories;

pub use memory::MemoryStore;
pub use repositories::{
    AnalysisRepository, BudgetRepository, ProjectRepository, ResourceRepository,
};
