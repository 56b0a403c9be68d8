//! Lane distance table reader.

use std::path::Path;

use serde::Deserialize;

use stockflow_core::WarehouseId;
use stockflow_optimizer::LaneTable;

use crate::error::{ExchangeError, ExchangeResult};

#[derive(Debug, Deserialize)]
struct LaneRow {
    #[serde(rename = "Warehouse_A")]
    warehouse_a: String,
    #[serde(rename = "Warehouse_B")]
    warehouse_b: String,
    #[serde(rename = "Distance_KM")]
    distance_km: f64,
}

/// Load the lane distance table from CSV.
///
/// The table may be sparse: pairs not listed fall back to
/// `default_distance_km`. Self-lanes and non-positive distances are invalid
/// rows, reported with their line number.
pub fn load_lane_distances(path: &Path, default_distance_km: f64) -> ExchangeResult<LaneTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = LaneTable::new(default_distance_km);

    for (index, result) in reader.deserialize::<LaneRow>().enumerate() {
        let line = index + 2;
        let row = result?;
        table
            .insert(
                WarehouseId::from(row.warehouse_a),
                WarehouseId::from(row.warehouse_b),
                row.distance_km,
            )
            .map_err(|err| ExchangeError::invalid_row(line, err.to_string()))?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_symmetric_table_with_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Warehouse_A,Warehouse_B,Distance_KM\n\
              Mumbai,Delhi,1400\n\
              Bangalore,Chennai,350\n",
        )
        .unwrap();

        let table = load_lane_distances(file.path(), 1500.0).unwrap();

        let delhi = WarehouseId::from("Delhi");
        let mumbai = WarehouseId::from("Mumbai");
        let kolkata = WarehouseId::from("Kolkata");
        assert_eq!(table.distance_km(&delhi, &mumbai).unwrap(), 1400.0);
        assert_eq!(table.distance_km(&mumbai, &kolkata).unwrap(), 1500.0);
    }

    #[test]
    fn self_lane_rows_are_rejected_with_their_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Warehouse_A,Warehouse_B,Distance_KM\n\
              Mumbai,Mumbai,0\n",
        )
        .unwrap();

        let err = load_lane_distances(file.path(), 1500.0).unwrap_err();
        match err {
            ExchangeError::InvalidRow { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
