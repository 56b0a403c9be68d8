//! Lane cost model: symmetric distances with a default fallback.

use std::collections::BTreeMap;

use stockflow_core::{PlanningError, PlanningResult, WarehouseId};

/// Unordered warehouse pair; the key of the symmetric distance table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneKey(WarehouseId, WarehouseId);

impl LaneKey {
    /// Build a key from two distinct warehouses, normalizing the order so
    /// that `new(a, b)` and `new(b, a)` produce the same key.
    ///
    /// A self-lane is a modeling error upstream and fails fast rather than
    /// silently resolving to a zero-length lane.
    pub fn new(a: WarehouseId, b: WarehouseId) -> PlanningResult<Self> {
        if a == b {
            return Err(PlanningError::malformed(format!(
                "self-referential lane {a}"
            )));
        }
        if b < a { Ok(Self(b, a)) } else { Ok(Self(a, b)) }
    }
}

/// Symmetric warehouse-to-warehouse distance table.
///
/// Pairs without a specific entry fall back to the configured default
/// distance, so a sparse table still prices every lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneTable {
    distances: BTreeMap<LaneKey, f64>,
    default_distance_km: f64,
}

impl LaneTable {
    pub fn new(default_distance_km: f64) -> Self {
        Self {
            distances: BTreeMap::new(),
            default_distance_km,
        }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Record the distance for a warehouse pair (either orientation).
    pub fn insert(
        &mut self,
        a: WarehouseId,
        b: WarehouseId,
        distance_km: f64,
    ) -> PlanningResult<()> {
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(PlanningError::malformed(format!(
                "invalid distance {distance_km} km for lane {a}-{b}"
            )));
        }
        self.distances.insert(LaneKey::new(a, b)?, distance_km);
        Ok(())
    }

    /// Lane distance in kilometres, falling back to the default when the
    /// pair has no specific entry. Symmetric by construction of [`LaneKey`].
    pub fn distance_km(&self, a: &WarehouseId, b: &WarehouseId) -> PlanningResult<f64> {
        let key = LaneKey::new(a.clone(), b.clone())?;
        Ok(self
            .distances
            .get(&key)
            .copied()
            .unwrap_or(self.default_distance_km))
    }

    /// Per-unit transfer cost over the lane at the given per-km rate.
    pub fn unit_cost(
        &self,
        a: &WarehouseId,
        b: &WarehouseId,
        rate_per_unit_km: f64,
    ) -> PlanningResult<f64> {
        Ok(self.distance_km(a, b)? * rate_per_unit_km)
    }
}
