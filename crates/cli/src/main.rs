//! Batch entry point: load the contract tables, run one optimization,
//! export the plan.

use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};

use stockflow_core::OptimizerConfig;
use stockflow_io::{export_plan, load_inventory, load_lane_distances, load_master_orders};
use stockflow_optimizer::{MinCostFlowSolver, Optimizer};

fn main() -> Result<()> {
    stockflow_observability::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [orders_path, inventory_path, lanes_path, out_dir] = args.as_slice() else {
        bail!("usage: stockflow <orders.csv> <inventory.csv> <lanes.csv> <output-dir>");
    };

    let config = OptimizerConfig::default();

    let orders =
        load_master_orders(Path::new(orders_path)).context("loading master order table")?;
    let inventory =
        load_inventory(Path::new(inventory_path)).context("loading inventory table")?;
    let lanes = load_lane_distances(Path::new(lanes_path), config.default_lane_distance_km)
        .context("loading lane distance table")?;
    tracing::info!(
        orders = orders.len(),
        pairs = inventory.len(),
        lanes = lanes.len(),
        "inputs loaded"
    );

    let solver = MinCostFlowSolver::new(config.solver_timeout());
    let optimizer = Optimizer::new(config, lanes)?.with_exact_solver(Box::new(solver));

    let plan = optimizer.plan(&orders, &inventory, None)?;
    let totals = plan.totals();

    std::fs::create_dir_all(out_dir).context("creating output directory")?;
    export_plan(Path::new(out_dir), &plan).context("exporting plan")?;

    tracing::info!(
        plan_id = %plan.id,
        units_moved = totals.units_moved,
        transfer_cost = totals.transfer_cost,
        holding_cost_relief = totals.holding_cost_relief,
        reorder_units = totals.reorder_units,
        degraded = plan.is_degraded(),
        "plan exported"
    );

    Ok(())
}
