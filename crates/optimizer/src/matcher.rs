//! Greedy transfer matcher: nearest-cost-first heuristic.

use core::cmp::Ordering;

use crate::solver::{Shipment, SolverError, TransferProblem, TransferSolution, TransferSolver};

/// Greedy bipartite matcher over one category.
///
/// Works the deficit list in descending magnitude order and feeds each
/// deficit from the cheapest remaining surplus first. Not globally
/// cost-optimal, but deterministic: every candidate ordering below is an
/// explicit total order, never incidental data order. The matcher ignores
/// the shortage penalty: it models "transfer whenever surplus exists" and
/// leaves cost/penalty trade-offs to the exact solver.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedyMatcher;

impl GreedyMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Run the heuristic. Infallible: a greedy pass always yields a plan.
    pub fn run(&self, problem: &TransferProblem) -> TransferSolution {
        let mut remaining_supply: Vec<i64> =
            problem.supplies.iter().map(|s| s.available).collect();
        let mut unmet: Vec<i64> = problem.demands.iter().map(|d| d.required).collect();
        let mut shipments = Vec::new();

        // Largest unmet need first; warehouse id breaks ties.
        let mut deficit_order: Vec<usize> = (0..problem.demands.len()).collect();
        deficit_order.sort_by(|&a, &b| {
            problem.demands[b]
                .required
                .cmp(&problem.demands[a].required)
                .then_with(|| problem.demands[a].warehouse.cmp(&problem.demands[b].warehouse))
        });

        for j in deficit_order {
            // Cheapest lane first; ties go to the larger remaining surplus,
            // then the lower warehouse id. Ordered against the remaining
            // magnitudes as they stand when this deficit is served.
            let mut candidates: Vec<usize> = (0..problem.supplies.len())
                .filter(|&i| remaining_supply[i] > 0)
                .collect();
            candidates.sort_by(|&a, &b| {
                cost_order(problem.unit_cost[a][j], problem.unit_cost[b][j])
                    .then_with(|| remaining_supply[b].cmp(&remaining_supply[a]))
                    .then_with(|| {
                        problem.supplies[a].warehouse.cmp(&problem.supplies[b].warehouse)
                    })
            });

            for i in candidates {
                if unmet[j] == 0 {
                    break;
                }
                let units = unmet[j].min(remaining_supply[i]);
                if units == 0 {
                    continue;
                }
                shipments.push(Shipment {
                    supply: i,
                    demand: j,
                    units,
                });
                remaining_supply[i] -= units;
                unmet[j] -= units;
            }
        }

        TransferSolution { shipments, unmet }
    }
}

fn cost_order(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

impl TransferSolver for GreedyMatcher {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, problem: &TransferProblem) -> Result<TransferSolution, SolverError> {
        Ok(self.run(problem))
    }
}
