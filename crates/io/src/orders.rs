//! Master order table reader.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use stockflow_core::{ProductCategory, WarehouseId};
use stockflow_optimizer::OrderEvent;

use crate::error::{ExchangeError, ExchangeResult};

/// Order dates arrive day-first ("17-03-2024") from the upstream feed.
const DATE_FORMAT: &str = "%d-%m-%Y";

/// The columns demand estimation consumes. The master table carries many
/// more (priority, segment, delivery data, ...); serde skips them.
#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Origin")]
    origin: String,
    #[serde(rename = "Product_Category")]
    product_category: String,
    #[serde(rename = "Order_Date")]
    order_date: String,
}

/// Load the master order table from CSV.
///
/// Order dates become midnight-UTC timestamps; a date that fails to parse
/// is an error naming its line, never a silently dropped row.
pub fn load_master_orders(path: &Path) -> ExchangeResult<Vec<OrderEvent>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut orders = Vec::new();

    for (index, result) in reader.deserialize::<OrderRow>().enumerate() {
        let line = index + 2; // 1-based, after the header row
        let row = result?;
        let placed_at = parse_order_date(&row.order_date)
            .ok_or_else(|| {
                ExchangeError::invalid_row(
                    line,
                    format!("unparseable order date {:?} (expected DD-MM-YYYY)", row.order_date),
                )
            })?;

        orders.push(OrderEvent {
            order_id: row.order_id,
            origin: WarehouseId::from(row.origin),
            product_category: ProductCategory::from(row.product_category),
            placed_at,
        });
    }

    Ok(orders)
}

fn parse_order_date(raw: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_orders_and_ignores_extra_columns() {
        let file = write_csv(
            "Order_ID,Origin,Product_Category,Order_Date,Priority\n\
             ORD-1,Mumbai,Books,17-03-2024,Express\n\
             ORD-2,Delhi,Toys,01-01-2024,Standard\n",
        );

        let orders = load_master_orders(file.path()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, "ORD-1");
        assert_eq!(orders[0].origin, WarehouseId::from("Mumbai"));
        assert_eq!(
            orders[0].placed_at,
            "2024-03-17T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn bad_date_is_an_error_naming_the_line() {
        let file = write_csv(
            "Order_ID,Origin,Product_Category,Order_Date\n\
             ORD-1,Mumbai,Books,17-03-2024\n\
             ORD-2,Delhi,Toys,2024/01/01\n",
        );

        let err = load_master_orders(file.path()).unwrap_err();
        match err {
            ExchangeError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
