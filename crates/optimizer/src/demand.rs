//! Demand estimation from the master order history.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{ProductCategory, WarehouseId};

/// One row of the master order table, as consumed by demand estimation.
///
/// Only the origin warehouse, product category and timestamp take part in
/// the estimate; any further master-table columns stay with the upstream
/// collaborator that produced the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub order_id: String,
    pub origin: WarehouseId,
    pub product_category: ProductCategory,
    pub placed_at: DateTime<Utc>,
}

/// Estimated daily demand per (warehouse, product) pair.
///
/// Pairs with no orders in the window have no entry; callers treat a missing
/// entry as a rate of zero.
pub type DemandRates = BTreeMap<(WarehouseId, ProductCategory), f64>;

/// Estimate daily demand over a trailing lookback window.
///
/// The window is anchored at `as_of` when supplied, otherwise at the latest
/// order timestamp, and spans `(anchor - lookback_days, anchor]`. Each order
/// counts as one demand unit: the master-order contract carries no quantity
/// column, so order counts are the best available signal (switching to
/// quantity summation is a contract change, not a correction).
///
/// Pure function of its inputs. `lookback_days` is validated upstream by
/// [`stockflow_core::OptimizerConfig::validate`] and must be positive.
pub fn estimate_daily_demand(
    orders: &[OrderEvent],
    lookback_days: u32,
    as_of: Option<DateTime<Utc>>,
) -> DemandRates {
    let mut rates = DemandRates::new();
    let Some(anchor) = as_of.or_else(|| orders.iter().map(|o| o.placed_at).max()) else {
        return rates;
    };
    let window_start = anchor - Duration::days(i64::from(lookback_days));

    let mut counts: BTreeMap<(WarehouseId, ProductCategory), u64> = BTreeMap::new();
    for order in orders {
        if order.placed_at <= window_start || order.placed_at > anchor {
            continue;
        }
        *counts
            .entry((order.origin.clone(), order.product_category.clone()))
            .or_insert(0) += 1;
    }

    for (pair, count) in counts {
        rates.insert(pair, count as f64 / f64::from(lookback_days));
    }
    rates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(origin: &str, category: &str, day: i64) -> OrderEvent {
        OrderEvent {
            order_id: format!("ORD-{origin}-{category}-{day}"),
            origin: WarehouseId::from(origin),
            product_category: ProductCategory::from(category),
            placed_at: base_time() + Duration::days(day),
        }
    }

    fn base_time() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn counts_orders_inside_the_window_only() {
        // Anchor at day 30; with a 7-day lookback, days 24..=30 are in.
        let orders = vec![
            order("Mumbai", "Books", 30),
            order("Mumbai", "Books", 25),
            order("Mumbai", "Books", 23), // exactly on the boundary, excluded
            order("Mumbai", "Books", 2),  // far outside
        ];
        let as_of = base_time() + Duration::days(30);

        let rates = estimate_daily_demand(&orders, 7, Some(as_of));
        let key = (WarehouseId::from("Mumbai"), ProductCategory::from("Books"));
        assert_eq!(rates.get(&key), Some(&(2.0 / 7.0)));
    }

    #[test]
    fn orders_after_the_anchor_are_excluded() {
        let orders = vec![order("Delhi", "Toys", 5), order("Delhi", "Toys", 10)];
        let as_of = base_time() + Duration::days(7);

        let rates = estimate_daily_demand(&orders, 30, Some(as_of));
        let key = (WarehouseId::from("Delhi"), ProductCategory::from("Toys"));
        assert_eq!(rates.get(&key), Some(&(1.0 / 30.0)));
    }

    #[test]
    fn anchor_defaults_to_latest_order() {
        let orders = vec![order("Delhi", "Toys", 3), order("Delhi", "Toys", 9)];

        let rates = estimate_daily_demand(&orders, 7, None);
        let key = (WarehouseId::from("Delhi"), ProductCategory::from("Toys"));
        // Window (day 2, day 9]: both orders land inside it.
        assert_eq!(rates.get(&key), Some(&(2.0 / 7.0)));
    }

    #[test]
    fn empty_order_log_yields_no_rates() {
        assert!(estimate_daily_demand(&[], 30, None).is_empty());
    }

    #[test]
    fn pairs_are_counted_independently() {
        let orders = vec![
            order("Mumbai", "Books", 10),
            order("Mumbai", "Toys", 10),
            order("Delhi", "Books", 10),
        ];
        let as_of = base_time() + Duration::days(10);

        let rates = estimate_daily_demand(&orders, 10, Some(as_of));
        assert_eq!(rates.len(), 3);
        for rate in rates.values() {
            assert_eq!(*rate, 0.1);
        }
    }
}
