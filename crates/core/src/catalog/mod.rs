//! Resource catalog: priced inputs for unit price analyses.

pub mod error;
pub mod service;
pub mod types;

pub use error::CatalogError;
pub use service::CatalogService;
pub use types::{CreateResourceInput, Resource, ResourceType, UpdateResourceInput};
