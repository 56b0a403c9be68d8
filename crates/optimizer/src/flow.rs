//! Exact transfer solver: successive-shortest-path min-cost flow.

use std::time::{Duration, Instant};

use crate::solver::{Shipment, SolverError, TransferProblem, TransferSolution, TransferSolver};

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    rev: usize,
    cap: i64,
    cost: f64,
}

/// Residual network for one category's transportation problem.
///
/// Layout: source → each supply (capacity = surplus magnitude, cost 0);
/// supply → demand arcs at the lane unit cost; a virtual shortage source
/// feeding every demand at the shortage penalty; demand → sink (capacity =
/// deficit magnitude). Pushing `total_required` units of flow is always
/// feasible thanks to the shortage arcs, so infeasibility cannot occur by
/// construction; the flow on a shortage arc is exactly the solver's unmet
/// quantity for that demand.
struct Network {
    graph: Vec<Vec<Edge>>,
}

impl Network {
    fn new(nodes: usize) -> Self {
        Self {
            graph: vec![Vec::new(); nodes],
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: i64, cost: f64) -> usize {
        let forward = self.graph[from].len();
        let backward = self.graph[to].len();
        self.graph[from].push(Edge {
            to,
            rev: backward,
            cap,
            cost,
        });
        self.graph[to].push(Edge {
            to: from,
            rev: forward,
            cap: 0,
            cost: -cost,
        });
        forward
    }

    /// Flow already pushed over the arc `(from, index)`.
    fn flow(&self, from: usize, index: usize) -> i64 {
        let edge = &self.graph[from][index];
        self.graph[edge.to][edge.rev].cap
    }

    /// Shortest path from `source` by reduced cost (Bellman-Ford: residual
    /// arcs carry negative costs). Returns per-node predecessor arcs.
    fn shortest_path(&self, source: usize) -> (Vec<f64>, Vec<Option<(usize, usize)>>) {
        let n = self.graph.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; n];
        dist[source] = 0.0;

        for _ in 0..n {
            let mut changed = false;
            for from in 0..n {
                if dist[from].is_infinite() {
                    continue;
                }
                for (index, edge) in self.graph[from].iter().enumerate() {
                    if edge.cap == 0 {
                        continue;
                    }
                    let next = dist[from] + edge.cost;
                    if next + EPS < dist[edge.to] {
                        dist[edge.to] = next;
                        prev[edge.to] = Some((from, index));
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        (dist, prev)
    }
}

/// Exact solver for the per-category transportation problem.
///
/// Minimizes `Σ cost(i,j)·x_ij + Σ shortage_penalty·u_j` subject to supply
/// caps and exact demand satisfaction. Supplies and demands are integral, so
/// the optimum is integral; successive shortest paths find it without any
/// external solver dependency. A demand is deliberately left unmet
/// (`u_j > 0`) when every remaining lane's unit cost exceeds the penalty.
///
/// The solve is bounded by a wall-clock budget checked between augmenting
/// paths; exceeding it returns [`SolverError::Timeout`] and the caller falls
/// back to the heuristic.
#[derive(Debug, Clone)]
pub struct MinCostFlowSolver {
    timeout: Duration,
}

impl MinCostFlowSolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl TransferSolver for MinCostFlowSolver {
    fn name(&self) -> &'static str {
        "min-cost-flow"
    }

    fn solve(&self, problem: &TransferProblem) -> Result<TransferSolution, SolverError> {
        let deadline = Instant::now() + self.timeout;

        let n_supply = problem.supplies.len();
        let n_demand = problem.demands.len();
        debug_assert_eq!(problem.unit_cost.len(), n_supply);

        // Node layout: source, supplies, shortage, demands, sink.
        let source = 0;
        let shortage = 1 + n_supply;
        let demand_base = 2 + n_supply;
        let sink = demand_base + n_demand;
        let mut network = Network::new(sink + 1);

        for (i, supply) in problem.supplies.iter().enumerate() {
            network.add_edge(source, 1 + i, supply.available, 0.0);
        }
        let total_required = problem.total_required();
        network.add_edge(source, shortage, total_required, 0.0);

        let mut supply_arcs = Vec::with_capacity(n_supply * n_demand);
        for (i, supply) in problem.supplies.iter().enumerate() {
            for (j, demand) in problem.demands.iter().enumerate() {
                let cap = supply.available.min(demand.required);
                let index =
                    network.add_edge(1 + i, demand_base + j, cap, problem.unit_cost[i][j]);
                supply_arcs.push((i, j, 1 + i, index));
            }
        }

        let mut shortage_arcs = Vec::with_capacity(n_demand);
        for (j, demand) in problem.demands.iter().enumerate() {
            let index = network.add_edge(
                shortage,
                demand_base + j,
                demand.required,
                problem.shortage_penalty,
            );
            shortage_arcs.push((j, shortage, index));
        }

        for (j, demand) in problem.demands.iter().enumerate() {
            network.add_edge(demand_base + j, sink, demand.required, 0.0);
        }

        let mut flow = 0;
        while flow < total_required {
            if Instant::now() >= deadline {
                return Err(SolverError::Timeout {
                    budget: self.timeout,
                });
            }

            let (dist, prev) = network.shortest_path(source);
            if dist[sink].is_infinite() {
                // Unreachable: shortage arcs keep the sink reachable until
                // every demand is satisfied.
                break;
            }

            let mut bottleneck = total_required - flow;
            let mut node = sink;
            while let Some((from, index)) = prev[node] {
                bottleneck = bottleneck.min(network.graph[from][index].cap);
                node = from;
            }

            let mut node = sink;
            while let Some((from, index)) = prev[node] {
                let rev = network.graph[from][index].rev;
                network.graph[from][index].cap -= bottleneck;
                let to = network.graph[from][index].to;
                network.graph[to][rev].cap += bottleneck;
                node = from;
            }
            flow += bottleneck;
        }

        let mut shipments = Vec::new();
        for &(i, j, from, index) in &supply_arcs {
            let units = network.flow(from, index);
            if units > 0 {
                shipments.push(Shipment {
                    supply: i,
                    demand: j,
                    units,
                });
            }
        }

        let mut unmet = vec![0i64; n_demand];
        for &(j, from, index) in &shortage_arcs {
            unmet[j] = network.flow(from, index);
        }

        Ok(TransferSolution { shipments, unmet })
    }
}
