//! Plan output: recommendations, degradations, aggregate totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{PlanId, ProductCategory, WarehouseId};

use crate::reorder::ReorderRecommendation;

/// One recommended stock movement between two warehouses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecommendation {
    pub origin_warehouse: WarehouseId,
    pub destination_warehouse: WarehouseId,
    pub product_category: ProductCategory,
    pub units: i64,
    pub distance_km: f64,
    pub transfer_cost: f64,
    /// Storage cost the origin stops paying for the moved units.
    pub holding_cost_relief: f64,
}

/// Record of a category whose exact solve was abandoned for the heuristic.
///
/// Degradations are warnings, not errors: the affected category still has a
/// full (heuristic) plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    pub category: ProductCategory,
    pub solver: String,
    pub reason: String,
}

/// Aggregate totals for display alongside the recommendation tables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanTotals {
    pub units_moved: i64,
    pub transfer_cost: f64,
    pub holding_cost_relief: f64,
    pub reorder_units: i64,
}

/// Output of one optimization run. Read-only once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub id: PlanId,
    pub generated_at: DateTime<Utc>,
    pub transfers: Vec<TransferRecommendation>,
    pub reorders: Vec<ReorderRecommendation>,
    pub degradations: Vec<Degradation>,
}

impl RebalancePlan {
    pub fn totals(&self) -> PlanTotals {
        let mut totals = PlanTotals::default();
        for transfer in &self.transfers {
            totals.units_moved += transfer.units;
            totals.transfer_cost += transfer.transfer_cost;
            totals.holding_cost_relief += transfer.holding_cost_relief;
        }
        for reorder in &self.reorders {
            totals.reorder_units += reorder.reorder_units;
        }
        totals
    }

    /// True when at least one category fell back to the heuristic.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_across_both_recommendation_kinds() {
        let plan = RebalancePlan {
            id: PlanId::new(),
            generated_at: Utc::now(),
            transfers: vec![
                TransferRecommendation {
                    origin_warehouse: WarehouseId::from("Mumbai"),
                    destination_warehouse: WarehouseId::from("Delhi"),
                    product_category: ProductCategory::from("Books"),
                    units: 140,
                    distance_km: 1400.0,
                    transfer_cost: 490_000.0,
                    holding_cost_relief: 210.0,
                },
                TransferRecommendation {
                    origin_warehouse: WarehouseId::from("Chennai"),
                    destination_warehouse: WarehouseId::from("Bangalore"),
                    product_category: ProductCategory::from("Toys"),
                    units: 10,
                    distance_km: 350.0,
                    transfer_cost: 8_750.0,
                    holding_cost_relief: 15.0,
                },
            ],
            reorders: vec![ReorderRecommendation {
                warehouse_id: WarehouseId::from("Kolkata"),
                product_category: ProductCategory::from("Books"),
                reorder_units: 90,
                resulting_stock: 90,
            }],
            degradations: Vec::new(),
        };

        let totals = plan.totals();
        assert_eq!(totals.units_moved, 150);
        assert_eq!(totals.transfer_cost, 498_750.0);
        assert_eq!(totals.holding_cost_relief, 225.0);
        assert_eq!(totals.reorder_units, 90);
        assert!(!plan.is_degraded());
    }
}
