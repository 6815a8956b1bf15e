//! Resource catalog data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use obra_shared::types::{Currency, ResourceId};

/// Resource type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Labor (crews, trades, supervision).
    Labor,
    /// Material (consumed in the work).
    Material,
    /// Equipment (owned or rented machinery).
    Equipment,
    /// Subcontracted work packages.
    Subcontract,
    /// Anything that does not fit the other categories.
    Other,
}

impl ResourceType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Labor => "labor",
            Self::Material => "material",
            Self::Equipment => "equipment",
            Self::Subcontract => "subcontract",
            Self::Other => "other",
        }
    }

    /// Parses a resource type from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "labor" => Some(Self::Labor),
            "material" => Some(Self::Material),
            "equipment" => Some(Self::Equipment),
            "subcontract" => Some(Self::Subcontract),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced input held in the catalog.
///
/// Mutable: `unit_cost` may change over time. Price changes never alter
/// snapshots already captured by analyses or budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Resource ID.
    pub id: ResourceId,
    /// Resource name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Resource type.
    pub resource_type: ResourceType,
    /// Unit of measure (e.g., "hour", "sqm", "piece").
    pub unit: String,
    /// Current cost per unit.
    pub unit_cost: Decimal,
    /// Currency the unit cost is quoted in.
    pub currency: Currency,
    /// Optional supplier name.
    pub supplier: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a resource.
#[derive(Debug, Clone)]
pub struct CreateResourceInput {
    /// Resource name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Resource type.
    pub resource_type: ResourceType,
    /// Unit of measure.
    pub unit: String,
    /// Cost per unit.
    pub unit_cost: Decimal,
    /// Currency; the configured default applies when omitted.
    pub currency: Option<Currency>,
    /// Optional supplier name.
    pub supplier: Option<String>,
}

/// Input for updating a resource.
#[derive(Debug, Clone, Default)]
pub struct UpdateResourceInput {
    /// New name.
    pub name: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New resource type.
    pub resource_type: Option<ResourceType>,
    /// New unit of measure.
    pub unit: Option<String>,
    /// New cost per unit.
    pub unit_cost: Option<Decimal>,
    /// New currency.
    pub currency: Option<Currency>,
    /// New supplier (`Some(None)` clears it).
    pub supplier: Option<Option<String>>,
}
