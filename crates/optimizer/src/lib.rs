//! `stockflow-optimizer`
//!
//! **Responsibility:** the inventory-rebalancing core.
//!
//! Given per-(warehouse, product) stock and an order history, this crate
//! estimates demand, classifies imbalances, matches surplus to deficit over
//! a distance-costed lane network, and sizes reorders for whatever the
//! transfers could not cover. The whole run is a pure batch computation over
//! an in-memory snapshot:
//! - No I/O inside matching or solving (adapters live in `stockflow-io`).
//! - No shared mutable state across runs.
//! - Deterministic output ordering regardless of execution interleaving.

pub mod classify;
pub mod demand;
pub mod flow;
pub mod lanes;
pub mod matcher;
pub mod pipeline;
pub mod plan;
pub mod reorder;
pub mod solver;

pub use classify::{ClassifiedState, InventoryRecord, StockClass, StockCover, classify_states};
pub use demand::{DemandRates, OrderEvent, estimate_daily_demand};
pub use flow::MinCostFlowSolver;
pub use lanes::{LaneKey, LaneTable};
pub use matcher::GreedyMatcher;
pub use pipeline::Optimizer;
pub use plan::{Degradation, PlanTotals, RebalancePlan, TransferRecommendation};
pub use reorder::{ReorderRecommendation, ResidualDeficit, size_reorders};
pub use solver::{
    DemandNode, Shipment, SolverError, SupplyNode, TransferProblem, TransferSolution,
    TransferSolver,
};
