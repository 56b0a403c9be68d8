//! `stockflow-io`
//!
//! **Responsibility:** boundary adapters between the optimizer and its
//! collaborators: CSV readers for the three contract tables (master
//! orders, inventory, lane distances) and CSV/JSON writers for the plans.
//!
//! No cleaning, no analytics: malformed rows are errors, not repairs.

pub mod error;
pub mod export;
pub mod inventory;
pub mod lanes;
pub mod orders;

pub use error::{ExchangeError, ExchangeResult};
pub use export::{export_plan, write_plan_json, write_reorder_plan, write_transfer_plan};
pub use inventory::load_inventory;
pub use lanes::load_lane_distances;
pub use orders::load_master_orders;
