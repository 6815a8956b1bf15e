//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use obra_shared::types::{AnalysisId, BudgetId, ProjectId, UserId};

use crate::version::types::VersionState;

/// Where a budget item's snapshot cost came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CostSource {
    /// Captured from an APU's total cost at add-time.
    Analysis {
        /// The referenced analysis.
        apu_id: AnalysisId,
    },
    /// A free-form cost line with a caller-supplied unit cost.
    Direct,
}

/// A budget line item.
///
/// `unit_cost` is a snapshot: for analysis-backed items it is the APU's
/// total cost at the moment the item was added, and later APU or catalog
/// edits never change it. Deleting the referenced APU leaves the snapshot
/// intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Cost provenance.
    pub source: CostSource,
    /// Quantity of APU units (or direct-line units).
    pub quantity: Decimal,
    /// Snapshot cost per unit.
    pub unit_cost: Decimal,
    /// Line description; for direct lines this is the description itself.
    pub description_override: Option<String>,
}

impl BudgetItem {
    /// Cost contributed by this item: `quantity * unit_cost`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// One version of a budget.
///
/// Versions of one lineage share the `id` and differ by `version`; only the
/// highest version is in the Draft state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Budget lineage ID.
    pub id: BudgetId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Budget name, unique per project among live lineages.
    pub name: String,
    /// Version number within the lineage (1-based, strictly increasing).
    pub version: u32,
    /// Draft or Frozen.
    pub state: VersionState,
    /// Ordered line items, owned by this version.
    pub items: Vec<BudgetItem>,
    /// User who created this version.
    pub created_by: UserId,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for one line of a new budget.
#[derive(Debug, Clone)]
pub enum BudgetItemInput {
    /// Reference an APU; its current total cost is snapshotted at add-time.
    Analysis {
        /// The analysis to snapshot.
        apu_id: AnalysisId,
        /// Quantity of APU units.
        quantity: Decimal,
        /// Optional more specific description for this line.
        description_override: Option<String>,
    },
    /// A free-form cost line.
    Direct {
        /// Line description.
        description: String,
        /// Quantity of units.
        quantity: Decimal,
        /// Caller-supplied cost per unit.
        unit_cost: Decimal,
    },
}

/// Input for creating a budget (Draft, version 1).
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Owning project.
    pub project_id: ProjectId,
    /// Budget name.
    pub name: String,
    /// Initial line items.
    pub items: Vec<BudgetItemInput>,
    /// User creating the budget.
    pub created_by: UserId,
}

/// Input for updating one budget line.
///
/// A line's snapshot `unit_cost` is deliberately not updatable: revisions
/// never re-snapshot silently.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetItemInput {
    /// New quantity.
    pub quantity: Option<Decimal>,
    /// New description (`Some(None)` clears it).
    pub description_override: Option<Option<String>>,
}
