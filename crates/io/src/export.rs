//! Plan export: flat CSV tables plus a JSON document with totals.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use stockflow_optimizer::{
    PlanTotals, RebalancePlan, ReorderRecommendation, TransferRecommendation,
};

use crate::error::ExchangeResult;

/// Write one CSV row per transfer recommendation.
pub fn write_transfer_plan(
    path: &Path,
    transfers: &[TransferRecommendation],
) -> ExchangeResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for transfer in transfers {
        writer.serialize(transfer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one CSV row per reorder recommendation.
pub fn write_reorder_plan(path: &Path, reorders: &[ReorderRecommendation]) -> ExchangeResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for reorder in reorders {
        writer.serialize(reorder)?;
    }
    writer.flush()?;
    Ok(())
}

/// The full plan plus its aggregate totals, for JSON consumers.
#[derive(Debug, Serialize)]
struct PlanDocument<'a> {
    #[serde(flatten)]
    plan: &'a RebalancePlan,
    totals: PlanTotals,
}

/// Write the whole plan (recommendations, degradations, totals) as JSON.
pub fn write_plan_json(path: &Path, plan: &RebalancePlan) -> ExchangeResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(
        file,
        &PlanDocument {
            plan,
            totals: plan.totals(),
        },
    )?;
    Ok(())
}

/// Export a plan into a directory: `transfers.csv`, `reorders.csv`,
/// `plan.json`. The directory must already exist.
pub fn export_plan(directory: &Path, plan: &RebalancePlan) -> ExchangeResult<()> {
    write_transfer_plan(&directory.join("transfers.csv"), &plan.transfers)?;
    write_reorder_plan(&directory.join("reorders.csv"), &plan.reorders)?;
    write_plan_json(&directory.join("plan.json"), plan)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockflow_core::{PlanId, ProductCategory, WarehouseId};

    fn sample_plan() -> RebalancePlan {
        RebalancePlan {
            id: PlanId::new(),
            generated_at: Utc::now(),
            transfers: vec![TransferRecommendation {
                origin_warehouse: WarehouseId::from("Mumbai"),
                destination_warehouse: WarehouseId::from("Delhi"),
                product_category: ProductCategory::from("Books"),
                units: 140,
                distance_km: 1400.0,
                transfer_cost: 490_000.0,
                holding_cost_relief: 210.0,
            }],
            reorders: vec![ReorderRecommendation {
                warehouse_id: WarehouseId::from("Kolkata"),
                product_category: ProductCategory::from("Books"),
                reorder_units: 90,
                resulting_stock: 90,
            }],
            degradations: Vec::new(),
        }
    }

    #[test]
    fn exports_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let plan = sample_plan();

        export_plan(dir.path(), &plan).unwrap();

        let transfers = std::fs::read_to_string(dir.path().join("transfers.csv")).unwrap();
        assert!(transfers.contains("Mumbai"));
        assert!(transfers.contains("140"));

        let reorders = std::fs::read_to_string(dir.path().join("reorders.csv")).unwrap();
        assert!(reorders.contains("Kolkata"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("plan.json")).unwrap())
                .unwrap();
        assert_eq!(json["totals"]["units_moved"], 140);
        assert_eq!(json["totals"]["reorder_units"], 90);
    }

    #[test]
    fn transfer_csv_has_one_row_per_recommendation() {
        let dir = tempfile::tempdir().unwrap();
        let plan = sample_plan();

        write_transfer_plan(&dir.path().join("t.csv"), &plan.transfers).unwrap();

        let content = std::fs::read_to_string(dir.path().join("t.csv")).unwrap();
        // Header plus one data row.
        assert_eq!(content.lines().count(), 2);
    }
}
