//! Unit price analyses (APUs): costed recipes composing catalog resources.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::AnalysisError;
pub use service::AnalysisService;
pub use types::{AnalysisItem, AnalysisItemInput, Apu, CreateAnalysisInput};
