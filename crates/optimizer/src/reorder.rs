//! Reorder sizing over residual deficit.

use serde::{Deserialize, Serialize};

use stockflow_core::{ProductCategory, WarehouseId};

/// Deficit left at one (warehouse, product) pair after the transfer step,
/// whether heuristic leftover or the exact solver's deliberate shortfall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualDeficit {
    pub warehouse_id: WarehouseId,
    pub product_category: ProductCategory,
    pub current_stock: i64,
    pub units: i64,
}

/// Replenishment recommendation for one (warehouse, product) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub warehouse_id: WarehouseId,
    pub product_category: ProductCategory,
    pub reorder_units: i64,
    pub resulting_stock: i64,
}

/// Size reorders for whatever deficit the transfer step left unresolved.
///
/// One recommendation per residual with `units > 0`; zero residual emits
/// nothing rather than a zero-unit record. Reordering exactly the residual
/// brings stock up to the demand-derived target and never past it, which
/// is what keeps the run's conservation invariant intact.
pub fn size_reorders(residuals: &[ResidualDeficit]) -> Vec<ReorderRecommendation> {
    residuals
        .iter()
        .filter(|residual| residual.units > 0)
        .map(|residual| ReorderRecommendation {
            warehouse_id: residual.warehouse_id.clone(),
            product_category: residual.product_category.clone(),
            reorder_units: residual.units,
            resulting_stock: residual.current_stock + residual.units,
        })
        .collect()
}
