//! Core business logic for Obra.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and cost calculations
//! live here.
//!
//! # Modules
//!
//! - `catalog` - Resource catalog (priced labor/material/equipment inputs)
//! - `analysis` - Unit price analyses (APUs) composed from resource snapshots
//! - `budget` - Budgets composed from APU snapshots or direct cost lines
//! - `version` - Append-only budget version chains with optimistic concurrency
//! - `rollup` - Project-level cost summaries
//! - `project` - Project validation and lifecycle status

pub mod analysis;
pub mod budget;
pub mod catalog;
pub mod project;
pub mod rollup;
pub mod version;
