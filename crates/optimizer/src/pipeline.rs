//! Batch pipeline: demand → classification → transfers → reorders.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use stockflow_core::{OptimizerConfig, PlanId, PlanningResult, ProductCategory};

use crate::classify::{ClassifiedState, InventoryRecord, StockClass, classify_states};
use crate::demand::{OrderEvent, estimate_daily_demand};
use crate::lanes::LaneTable;
use crate::matcher::GreedyMatcher;
use crate::plan::{Degradation, RebalancePlan, TransferRecommendation};
use crate::reorder::{ResidualDeficit, size_reorders};
use crate::solver::{DemandNode, SupplyNode, TransferProblem, TransferSolution, TransferSolver};

/// Everything one category contributes to the final plan.
struct CategoryOutcome {
    transfers: Vec<TransferRecommendation>,
    residuals: Vec<ResidualDeficit>,
    degradation: Option<Degradation>,
}

/// Batch inventory-rebalancing optimizer.
///
/// Holds the configuration, lane table and optional exact solver for a run;
/// [`Optimizer::plan`] is a pure function of its inputs apart from the plan
/// id and generation timestamp stamped on the result. Categories are
/// independent, so they fan out across worker threads; outcomes are
/// reassembled in category order, which keeps output bytes identical no
/// matter how the threads interleave.
pub struct Optimizer {
    config: OptimizerConfig,
    lanes: LaneTable,
    exact: Option<Box<dyn TransferSolver>>,
}

impl Optimizer {
    /// Build an optimizer, validating the configuration before anything
    /// runs. An invalid configuration never produces a partial plan.
    pub fn new(config: OptimizerConfig, lanes: LaneTable) -> PlanningResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            lanes,
            exact: None,
        })
    }

    /// Inject an exact solver to try ahead of the greedy heuristic.
    ///
    /// Solver presence is configuration, not a compile-time choice; without
    /// one, every category goes straight to the heuristic.
    pub fn with_exact_solver(mut self, solver: Box<dyn TransferSolver>) -> Self {
        self.exact = Some(solver);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run one optimization over an in-memory snapshot.
    ///
    /// `as_of` anchors the demand lookback window; `None` anchors at the
    /// latest order timestamp. Every classified imbalance surfaces in the
    /// combined transfer + reorder output; nothing is silently dropped.
    pub fn plan(
        &self,
        orders: &[OrderEvent],
        inventory: &[InventoryRecord],
        as_of: Option<DateTime<Utc>>,
    ) -> PlanningResult<RebalancePlan> {
        let demand = estimate_daily_demand(orders, self.config.lookback_days, as_of);
        let states = classify_states(inventory, &demand, &self.config)?;

        let mut categories: BTreeMap<ProductCategory, Vec<&ClassifiedState>> = BTreeMap::new();
        for state in &states {
            categories
                .entry(state.product_category.clone())
                .or_default()
                .push(state);
        }
        let categories: Vec<(ProductCategory, Vec<&ClassifiedState>)> =
            categories.into_iter().collect();

        // Fan out per category; `collect` preserves the (sorted) input
        // order, so thread interleaving cannot leak into the output.
        let outcomes = categories
            .par_iter()
            .map(|(category, members)| self.plan_category(category, members))
            .collect::<PlanningResult<Vec<CategoryOutcome>>>()?;

        let mut transfers = Vec::new();
        let mut residuals = Vec::new();
        let mut degradations = Vec::new();
        for outcome in outcomes {
            transfers.extend(outcome.transfers);
            residuals.extend(outcome.residuals);
            degradations.extend(outcome.degradation);
        }
        let reorders = size_reorders(&residuals);

        let plan = RebalancePlan {
            id: PlanId::new(),
            generated_at: Utc::now(),
            transfers,
            reorders,
            degradations,
        };
        info!(
            plan_id = %plan.id,
            transfers = plan.transfers.len(),
            reorders = plan.reorders.len(),
            degraded_categories = plan.degradations.len(),
            "rebalance plan generated"
        );
        Ok(plan)
    }

    fn plan_category(
        &self,
        category: &ProductCategory,
        members: &[&ClassifiedState],
    ) -> PlanningResult<CategoryOutcome> {
        let surplus: Vec<&ClassifiedState> = members
            .iter()
            .copied()
            .filter(|s| s.class == StockClass::Surplus)
            .collect();
        let deficit: Vec<&ClassifiedState> = members
            .iter()
            .copied()
            .filter(|s| s.class == StockClass::Deficit)
            .collect();

        if deficit.is_empty() {
            return Ok(CategoryOutcome {
                transfers: Vec::new(),
                residuals: Vec::new(),
                degradation: None,
            });
        }

        let problem = self.build_problem(category, &surplus, &deficit)?;

        let (solution, degradation) = match &self.exact {
            Some(solver) => match solver.solve(&problem) {
                Ok(solution) => (solution, None),
                Err(err) => {
                    warn!(
                        category = %category,
                        solver = solver.name(),
                        error = %err,
                        "exact solve failed; falling back to greedy heuristic"
                    );
                    (
                        GreedyMatcher.run(&problem),
                        Some(Degradation {
                            category: category.clone(),
                            solver: solver.name().to_string(),
                            reason: err.to_string(),
                        }),
                    )
                }
            },
            None => (GreedyMatcher.run(&problem), None),
        };

        debug_assert!(conserves(&problem, &solution));

        let transfers = solution
            .shipments
            .iter()
            .map(|shipment| {
                let origin = surplus[shipment.supply];
                let destination = deficit[shipment.demand];
                let unit_cost = problem.unit_cost[shipment.supply][shipment.demand];
                TransferRecommendation {
                    origin_warehouse: origin.warehouse_id.clone(),
                    destination_warehouse: destination.warehouse_id.clone(),
                    product_category: category.clone(),
                    units: shipment.units,
                    distance_km: problem.lane_km[shipment.supply][shipment.demand],
                    transfer_cost: shipment.units as f64 * unit_cost,
                    holding_cost_relief: shipment.units as f64 * origin.per_unit_storage_cost,
                }
            })
            .collect();

        let residuals = deficit
            .iter()
            .zip(&solution.unmet)
            .filter(|(_, unmet)| **unmet > 0)
            .map(|(state, unmet)| ResidualDeficit {
                warehouse_id: state.warehouse_id.clone(),
                product_category: category.clone(),
                current_stock: state.current_stock,
                units: *unmet,
            })
            .collect();

        Ok(CategoryOutcome {
            transfers,
            residuals,
            degradation,
        })
    }

    fn build_problem(
        &self,
        category: &ProductCategory,
        surplus: &[&ClassifiedState],
        deficit: &[&ClassifiedState],
    ) -> PlanningResult<TransferProblem> {
        let supplies: Vec<SupplyNode> = surplus
            .iter()
            .map(|s| SupplyNode {
                warehouse: s.warehouse_id.clone(),
                available: s.magnitude(),
            })
            .collect();
        let demands: Vec<DemandNode> = deficit
            .iter()
            .map(|d| DemandNode {
                warehouse: d.warehouse_id.clone(),
                required: d.magnitude(),
            })
            .collect();

        let mut unit_cost = Vec::with_capacity(supplies.len());
        let mut lane_km = Vec::with_capacity(supplies.len());
        for supply in &supplies {
            let mut cost_row = Vec::with_capacity(demands.len());
            let mut km_row = Vec::with_capacity(demands.len());
            for demand in &demands {
                let km = self.lanes.distance_km(&supply.warehouse, &demand.warehouse)?;
                km_row.push(km);
                cost_row.push(km * self.config.rate_per_unit_km);
            }
            unit_cost.push(cost_row);
            lane_km.push(km_row);
        }

        Ok(TransferProblem {
            category: category.clone(),
            supplies,
            demands,
            unit_cost,
            lane_km,
            shortage_penalty: self.config.shortage_penalty,
        })
    }
}

/// Solver contract check, kept behind `debug_assert`.
fn conserves(problem: &TransferProblem, solution: &TransferSolution) -> bool {
    problem.demands.iter().enumerate().all(|(j, demand)| {
        solution.shipped_to(j) + solution.unmet[j] == demand.required
    }) && problem
        .supplies
        .iter()
        .enumerate()
        .all(|(i, supply)| solution.shipped_from(i) <= supply.available)
}
