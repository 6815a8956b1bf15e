//! Budget version chains: Draft/Frozen states, append-only revisions,
//! optimistic concurrency.

pub mod error;
pub mod service;
pub mod types;

pub use error::VersionError;
pub use service::VersionService;
pub use types::{BudgetLineage, VersionState};
