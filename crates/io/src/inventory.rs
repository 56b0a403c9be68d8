//! Warehouse inventory table reader.

use std::path::Path;

use serde::Deserialize;

use stockflow_core::{ProductCategory, WarehouseId};
use stockflow_optimizer::InventoryRecord;

use crate::error::ExchangeResult;

#[derive(Debug, Deserialize)]
struct InventoryRow {
    #[serde(rename = "Warehouse")]
    warehouse: String,
    #[serde(rename = "Product_Category")]
    product_category: String,
    #[serde(rename = "Stock_Level")]
    stock_level: i64,
    #[serde(rename = "Reorder_Level")]
    reorder_level: i64,
    #[serde(rename = "Storage_Cost_INR_per_unit")]
    storage_cost_per_unit: f64,
}

/// Load the warehouse inventory table from CSV.
///
/// Rows map one-to-one onto [`InventoryRecord`]s; contract validation
/// (negative stock, duplicate pairs) is the classifier's job, so every
/// syntactically valid row passes through untouched.
pub fn load_inventory(path: &Path) -> ExchangeResult<Vec<InventoryRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize::<InventoryRow>() {
        let row = result?;
        records.push(InventoryRecord {
            warehouse_id: WarehouseId::from(row.warehouse),
            product_category: ProductCategory::from(row.product_category),
            current_stock: row.stock_level,
            reorder_threshold: row.reorder_level,
            per_unit_storage_cost: row.storage_cost_per_unit,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_inventory_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Warehouse,Product_Category,Stock_Level,Reorder_Level,Storage_Cost_INR_per_unit\n\
              Mumbai,Books,5000,200,1.5\n\
              Delhi,Books,0,200,2.0\n",
        )
        .unwrap();

        let records = load_inventory(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].warehouse_id, WarehouseId::from("Mumbai"));
        assert_eq!(records[0].current_stock, 5000);
        assert_eq!(records[1].per_unit_storage_cost, 2.0);
    }

    #[test]
    fn non_numeric_stock_is_a_csv_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Warehouse,Product_Category,Stock_Level,Reorder_Level,Storage_Cost_INR_per_unit\n\
              Mumbai,Books,lots,200,1.5\n",
        )
        .unwrap();

        assert!(load_inventory(file.path()).is_err());
    }
}
