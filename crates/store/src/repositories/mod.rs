//! Repository abstractions for data access.
//!
//! Repositories provide the storage collaborator interface of the engine:
//! create/read/update/delete by identity per entity type, with budget
//! mutations guarded by the caller's observed version.

pub mod analysis;
pub mod budget;
pub mod project;
pub mod resource;

pub use analysis::AnalysisRepository;
pub use budget::BudgetRepository;
pub use project::ProjectRepository;
pub use resource::ResourceRepository;
