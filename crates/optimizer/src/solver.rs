//! Transfer solver capability interface and problem model.

use std::time::Duration;

use thiserror::Error;

use stockflow_core::{ProductCategory, WarehouseId};

/// Supply side of one category's transfer problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyNode {
    pub warehouse: WarehouseId,
    /// Surplus magnitude in whole units; always positive.
    pub available: i64,
}

/// Demand side of one category's transfer problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandNode {
    pub warehouse: WarehouseId,
    /// Deficit magnitude in whole units; always positive.
    pub required: i64,
}

/// One product category's transportation problem.
///
/// Lane lookups happen before the problem is built, so solvers stay pure
/// arithmetic: `unit_cost[i][j]` prices one unit moved from supply `i` to
/// demand `j`, and `lane_km[i][j]` carries the matching distance for the
/// recommendation records. `shortage_penalty` is the cost-equivalent of
/// leaving one demanded unit unmet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferProblem {
    pub category: ProductCategory,
    pub supplies: Vec<SupplyNode>,
    pub demands: Vec<DemandNode>,
    pub unit_cost: Vec<Vec<f64>>,
    pub lane_km: Vec<Vec<f64>>,
    pub shortage_penalty: f64,
}

impl TransferProblem {
    pub fn total_available(&self) -> i64 {
        self.supplies.iter().map(|s| s.available).sum()
    }

    pub fn total_required(&self) -> i64 {
        self.demands.iter().map(|d| d.required).sum()
    }
}

/// Units moved along one supply→demand arc, by node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shipment {
    pub supply: usize,
    pub demand: usize,
    /// Always positive; zero-unit shipments are never emitted.
    pub units: i64,
}

/// A solver's answer: shipments plus per-demand unmet units.
///
/// Solutions must conserve units: for every demand `j`, shipments into `j`
/// plus `unmet[j]` equal `demands[j].required`; for every supply `i`,
/// shipments out of `i` never exceed `supplies[i].available`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSolution {
    pub shipments: Vec<Shipment>,
    /// Unmet units per demand node, index-aligned with
    /// [`TransferProblem::demands`].
    pub unmet: Vec<i64>,
}

impl TransferSolution {
    /// Units shipped into demand node `j`.
    pub fn shipped_to(&self, demand: usize) -> i64 {
        self.shipments
            .iter()
            .filter(|s| s.demand == demand)
            .map(|s| s.units)
            .sum()
    }

    /// Units shipped out of supply node `i`.
    pub fn shipped_from(&self, supply: usize) -> i64 {
        self.shipments
            .iter()
            .filter(|s| s.supply == supply)
            .map(|s| s.units)
            .sum()
    }
}

/// Why a solve produced no usable solution.
///
/// Neither variant fails the run: the pipeline falls back to the greedy
/// heuristic for the affected category and reports the degradation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("solver unavailable: {0}")]
    Unavailable(String),

    #[error("solve exceeded its budget of {budget:?}")]
    Timeout { budget: Duration },
}

/// Capability interface: anything that can plan one category's transfers.
///
/// Implementations must be pure (no I/O, and the same problem always gets
/// the same solution) so categories can run on worker threads with no
/// coordination.
/// The greedy matcher is the always-available default; exact solvers may be
/// absent or time out, and callers fall back rather than fail the run.
pub trait TransferSolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, problem: &TransferProblem) -> Result<TransferSolution, SolverError>;
}
