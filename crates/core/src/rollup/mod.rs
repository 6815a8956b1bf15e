//! Project-level cost rollups.

pub mod service;
pub mod types;

pub use service::RollupService;
pub use types::ProjectSummary;
