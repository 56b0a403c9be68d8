//! Strongly-typed identifiers used across the planning domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one optimization run's output plan.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(Uuid);

impl PlanId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PlanId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PlanId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<PlanId> for Uuid {
    fn from(value: PlanId) -> Self {
        value.0
    }
}

macro_rules! impl_name_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

/// Identifier of a warehouse (network node).
///
/// Warehouses are named by the upstream inventory feed ("Mumbai", "Delhi",
/// ...); the newtype exists so lanes, states and recommendations cannot mix
/// up warehouses with product categories. `Ord` is derived because candidate
/// orderings use the warehouse id as the final deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

/// Product category ("Books", "Electronics", ...).
///
/// Categories partition the rebalancing problem: there is no cross-category
/// substitution, so each category is matched independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCategory(String);

impl_name_newtype!(WarehouseId);
impl_name_newtype!(ProductCategory);
