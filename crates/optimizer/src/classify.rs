//! Stock classification: surplus / deficit / balanced per pair.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use stockflow_core::{OptimizerConfig, PlanningError, PlanningResult, ProductCategory, WarehouseId};

use crate::demand::DemandRates;

/// One row of the warehouse inventory table (upstream contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub warehouse_id: WarehouseId,
    pub product_category: ProductCategory,
    pub current_stock: i64,
    pub reorder_threshold: i64,
    pub per_unit_storage_cost: f64,
}

/// Imbalance classification of one (warehouse, product) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockClass {
    Surplus,
    Deficit,
    Balanced,
}

/// Days of stock cover at the current demand rate.
///
/// `Unbounded` stands in for pairs with zero observed demand, where any
/// positive stock lasts indefinitely. The sentinel keeps division by zero
/// out of the model entirely.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockCover {
    Days(f64),
    Unbounded,
}

/// One classified (warehouse, product) pair.
///
/// Created fresh per optimization run and immutable afterwards. The
/// magnitudes recorded here are the baseline every conservation check runs
/// against: units shipped in plus units reordered must reproduce the deficit
/// exactly, and units shipped out may never exceed the surplus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedState {
    pub warehouse_id: WarehouseId,
    pub product_category: ProductCategory,
    pub current_stock: i64,
    pub reorder_threshold: i64,
    pub per_unit_storage_cost: f64,
    pub estimated_daily_demand: f64,
    pub target_stock: i64,
    pub imbalance: i64,
    pub class: StockClass,
    pub stock_cover: StockCover,
}

impl ClassifiedState {
    /// Surplus or deficit size in whole units; zero when balanced.
    pub fn magnitude(&self) -> i64 {
        self.imbalance.abs()
    }
}

/// Round half-up to whole units (0.5 rounds to 1).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Classify every inventory record against its demand-derived target.
///
/// `target_stock = round_half_up(daily demand × safety stock days)`;
/// `imbalance = current_stock − target_stock`. A pair present in inventory
/// but absent from the order history still classifies: demand is zero, any
/// positive stock is surplus, and stock cover is the unbounded sentinel.
///
/// Fails fast on contract violations (negative stock or threshold, duplicate
/// pairs, malformed storage cost), naming the offending pair. Input records
/// are never mutated; output is sorted by (warehouse, product).
pub fn classify_states(
    inventory: &[InventoryRecord],
    demand: &DemandRates,
    config: &OptimizerConfig,
) -> PlanningResult<Vec<ClassifiedState>> {
    let mut seen: BTreeSet<(WarehouseId, ProductCategory)> = BTreeSet::new();
    let mut states = Vec::with_capacity(inventory.len());

    for record in inventory {
        let pair = (record.warehouse_id.clone(), record.product_category.clone());
        if record.current_stock < 0 {
            return Err(PlanningError::malformed(format!(
                "negative stock {} for {}/{}",
                record.current_stock, record.warehouse_id, record.product_category
            )));
        }
        if record.reorder_threshold < 0 {
            return Err(PlanningError::malformed(format!(
                "negative reorder threshold {} for {}/{}",
                record.reorder_threshold, record.warehouse_id, record.product_category
            )));
        }
        if !(record.per_unit_storage_cost.is_finite() && record.per_unit_storage_cost >= 0.0) {
            return Err(PlanningError::malformed(format!(
                "invalid storage cost {} for {}/{}",
                record.per_unit_storage_cost, record.warehouse_id, record.product_category
            )));
        }
        if !seen.insert(pair.clone()) {
            return Err(PlanningError::malformed(format!(
                "duplicate inventory pair {}/{}",
                record.warehouse_id, record.product_category
            )));
        }

        let rate = demand.get(&pair).copied().unwrap_or(0.0);
        let target_stock = round_half_up(rate * f64::from(config.safety_stock_days));
        let imbalance = record.current_stock - target_stock;
        let class = match imbalance.cmp(&0) {
            core::cmp::Ordering::Greater => StockClass::Surplus,
            core::cmp::Ordering::Less => StockClass::Deficit,
            core::cmp::Ordering::Equal => StockClass::Balanced,
        };
        let stock_cover = if rate > 0.0 {
            StockCover::Days(record.current_stock as f64 / rate)
        } else {
            StockCover::Unbounded
        };

        states.push(ClassifiedState {
            warehouse_id: record.warehouse_id.clone(),
            product_category: record.product_category.clone(),
            current_stock: record.current_stock,
            reorder_threshold: record.reorder_threshold,
            per_unit_storage_cost: record.per_unit_storage_cost,
            estimated_daily_demand: rate,
            target_stock,
            imbalance,
            class,
            stock_cover,
        });
    }

    states.sort_by(|a, b| {
        (&a.warehouse_id, &a.product_category).cmp(&(&b.warehouse_id, &b.product_category))
    });
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(warehouse: &str, category: &str, stock: i64) -> InventoryRecord {
        InventoryRecord {
            warehouse_id: WarehouseId::from(warehouse),
            product_category: ProductCategory::from(category),
            current_stock: stock,
            reorder_threshold: 50,
            per_unit_storage_cost: 1.5,
        }
    }

    fn rates(entries: &[(&str, &str, f64)]) -> DemandRates {
        entries
            .iter()
            .map(|(w, c, rate)| ((WarehouseId::from(*w), ProductCategory::from(*c)), *rate))
            .collect()
    }

    fn config() -> OptimizerConfig {
        OptimizerConfig::default().with_safety_stock_days(14)
    }

    #[test]
    fn deficit_when_stock_is_below_target() {
        let demand = rates(&[("Delhi", "Books", 10.0)]);
        let states = classify_states(&[record("Delhi", "Books", 100)], &demand, &config()).unwrap();

        let state = &states[0];
        assert_eq!(state.target_stock, 140);
        assert_eq!(state.imbalance, -40);
        assert_eq!(state.class, StockClass::Deficit);
        assert_eq!(state.magnitude(), 40);
        assert_eq!(state.stock_cover, StockCover::Days(10.0));
    }

    #[test]
    fn target_rounds_half_up() {
        // 0.75/day over 14 days = 10.5 units, which rounds to 11.
        let demand = rates(&[("Delhi", "Books", 0.75)]);
        let states = classify_states(&[record("Delhi", "Books", 11)], &demand, &config()).unwrap();

        assert_eq!(states[0].target_stock, 11);
        assert_eq!(states[0].class, StockClass::Balanced);
    }

    #[test]
    fn zero_demand_with_stock_is_surplus_with_unbounded_cover() {
        let states =
            classify_states(&[record("Mumbai", "Books", 5000)], &DemandRates::new(), &config())
                .unwrap();

        let state = &states[0];
        assert_eq!(state.class, StockClass::Surplus);
        assert_eq!(state.magnitude(), 5000);
        assert_eq!(state.stock_cover, StockCover::Unbounded);
    }

    #[test]
    fn zero_demand_with_zero_stock_is_balanced() {
        let states =
            classify_states(&[record("Mumbai", "Books", 0)], &DemandRates::new(), &config())
                .unwrap();
        assert_eq!(states[0].class, StockClass::Balanced);
    }

    #[test]
    fn negative_stock_fails_fast_naming_the_pair() {
        let err =
            classify_states(&[record("Mumbai", "Books", -1)], &DemandRates::new(), &config())
                .unwrap_err();
        assert!(err.to_string().contains("Mumbai/Books"));
    }

    #[test]
    fn duplicate_pairs_are_rejected() {
        let records = vec![record("Mumbai", "Books", 10), record("Mumbai", "Books", 20)];
        let err = classify_states(&records, &DemandRates::new(), &config()).unwrap_err();
        assert!(matches!(err, PlanningError::MalformedRecord(_)));
    }

    #[test]
    fn output_is_sorted_by_warehouse_then_category() {
        let records = vec![
            record("Mumbai", "Toys", 10),
            record("Delhi", "Books", 10),
            record("Mumbai", "Books", 10),
        ];
        let states = classify_states(&records, &DemandRates::new(), &config()).unwrap();
        let order: Vec<_> = states
            .iter()
            .map(|s| (s.warehouse_id.as_str(), s.product_category.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("Delhi", "Books"), ("Mumbai", "Books"), ("Mumbai", "Toys")]
        );
    }
}
