//! Unit price analysis data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use obra_shared::types::{AnalysisId, ProjectId, ResourceId};

/// A component of an APU: a resource reference plus a snapshot cost.
///
/// `cost_per_unit` is captured from the resource's `unit_cost` at the moment
/// the item is added and is immutable afterwards. Changing the underlying
/// resource's price never changes an already-captured item; the explicit
/// recost operation is the only sanctioned propagation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    /// The referenced catalog resource.
    pub resource_id: ResourceId,
    /// Quantity of the resource per unit of work.
    pub quantity: Decimal,
    /// Snapshot of the resource's unit cost at add-time.
    pub cost_per_unit: Decimal,
}

impl AnalysisItem {
    /// Cost contributed by this item: `quantity * cost_per_unit`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.quantity * self.cost_per_unit
    }
}

/// A unit price analysis: a reusable costed recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apu {
    /// Analysis ID.
    pub id: AnalysisId,
    /// Unique code at catalog scope.
    pub code: String,
    /// What the analysis prices (e.g., "Brick wall, 15cm").
    pub description: String,
    /// Unit of work the analysis prices (e.g., "sqm").
    pub unit: String,
    /// Ordered component items, owned by this analysis.
    pub items: Vec<AnalysisItem>,
    /// Owning project; `None` marks a reusable template.
    pub project_id: Option<ProjectId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for one component of a new analysis.
#[derive(Debug, Clone)]
pub struct AnalysisItemInput {
    /// The catalog resource to snapshot.
    pub resource_id: ResourceId,
    /// Quantity of the resource per unit of work.
    pub quantity: Decimal,
}

/// Input for creating an analysis.
#[derive(Debug, Clone)]
pub struct CreateAnalysisInput {
    /// Unique code at catalog scope.
    pub code: String,
    /// What the analysis prices.
    pub description: String,
    /// Unit of work the analysis prices.
    pub unit: String,
    /// Component items.
    pub items: Vec<AnalysisItemInput>,
    /// Owning project; `None` marks a reusable template.
    pub project_id: Option<ProjectId>,
}
