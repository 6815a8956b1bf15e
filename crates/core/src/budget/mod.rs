//! Budgets: costed plans composed from APU snapshots or direct lines.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    Budget, BudgetItem, BudgetItemInput, CostSource, CreateBudgetInput, UpdateBudgetItemInput,
};
