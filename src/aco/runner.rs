//! ACO outer loop.

use super::ant::AntPath;
use super::colony::ColonyRound;
use super::config::AcoConfig;
use super::pheromone::PheromoneField;
use crate::error::AcoError;
use crate::graph::{NodeId, Point, WeightedGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Why the outer loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All configured rounds ran.
    BudgetExhausted,
    /// The cancellation flag was observed at a round boundary.
    Cancelled,
}

/// Per-round progress passed to a [`RoundObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundStats {
    /// 1-based round number.
    pub iteration: usize,
    /// Ants that reached the destination this round.
    pub arrivals: usize,
    /// Ants that got stuck this round.
    pub dead_ends: usize,
    /// Cheapest walk of this round, if any.
    pub round_best: Option<f64>,
    /// Best cost over all rounds so far (`INFINITY` until a path is found).
    pub best_cost: f64,
}

/// Receives progress after every completed round.
pub trait RoundObserver {
    fn on_round(&mut self, stats: &RoundStats);
}

struct Silent;

impl RoundObserver for Silent {
    fn on_round(&mut self, _stats: &RoundStats) {}
}

impl<F: FnMut(&RoundStats)> RoundObserver for F {
    fn on_round(&mut self, stats: &RoundStats) {
        self(stats)
    }
}

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Best path found, source first.
    pub path: Vec<NodeId>,

    /// Positions along `path`.
    pub points: Vec<Point>,

    /// Cost of `path`.
    pub cost: f64,

    /// Rounds completed.
    pub iterations: usize,

    /// Why the loop stopped.
    pub stop_reason: StopReason,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost after each completed round.
    pub cost_history: Vec<f64>,

    /// Walks that reached the destination, over all rounds.
    pub arrivals: usize,

    /// Walks that got stuck, over all rounds.
    pub dead_ends: usize,

    /// Pheromone levels after the last completed round.
    pub pheromone: PheromoneField,
}

/// Executes the ACO path search.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner};
/// use u_aco::graph::{GraphBuilder, Node};
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_node(Node::at(0.0, 0.0));
/// let m = b.add_node(Node::at(1.0, 0.0));
/// let z = b.add_node(Node::at(2.0, 0.0));
/// b.connect(a, m).unwrap();
/// b.connect(m, z).unwrap();
/// let graph = b.build();
///
/// let config = AcoConfig::classic().with_seed(42);
/// let result = AcoRunner::run(&graph, a, z, &config).unwrap();
/// assert_eq!(result.path, vec![a, m, z]);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the search to completion.
    pub fn run(
        graph: &WeightedGraph,
        source: NodeId,
        destination: NodeId,
        config: &AcoConfig,
    ) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(graph, source, destination, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the search
    /// stops before the next round and returns the best path found so far.
    pub fn run_with_cancel(
        graph: &WeightedGraph,
        source: NodeId,
        destination: NodeId,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        Self::run_observed(graph, source, destination, config, cancel, &mut Silent)
    }

    /// Runs the search, reporting every round to `observer`.
    ///
    /// # Errors
    ///
    /// - [`AcoError::InvalidParameter`] for an invalid config or
    ///   `source == destination`
    /// - [`AcoError::UnknownNode`] if an endpoint is not in `graph`
    /// - [`AcoError::MissingDistanceToOrigin`] if `delta > 0` and
    ///   [`WeightedGraph::compute_distance_to_origin`] has not run
    /// - [`AcoError::NoPathFound`] if no ant ever arrived
    pub fn run_observed<O: RoundObserver + ?Sized>(
        graph: &WeightedGraph,
        source: NodeId,
        destination: NodeId,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> Result<AcoResult, AcoError> {
        config.validate()?;
        for id in [source, destination] {
            if !graph.contains(id) {
                return Err(AcoError::UnknownNode(id));
            }
        }
        if source == destination {
            return Err(AcoError::invalid(format!(
                "source and destination are both {source}"
            )));
        }
        if config.exponents.delta > 0.0 && graph.origin().is_none() {
            return Err(AcoError::MissingDistanceToOrigin);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut pheromone = PheromoneField::with_level(graph, config.initial_pheromone)
            .with_floor(config.min_pheromone);

        info!(
            %source,
            %destination,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ants = config.num_ants,
            iterations = config.iterations,
            "starting ant colony search"
        );

        let mut best: Option<AntPath> = None;
        let mut best_cost = f64::INFINITY;
        let mut cost_history = Vec::with_capacity(config.iterations);
        let mut arrivals = 0usize;
        let mut dead_ends = 0usize;
        let mut stop_reason = StopReason::BudgetExhausted;

        for iteration in 1..=config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    stop_reason = StopReason::Cancelled;
                    break;
                }
            }

            let round_seed: u64 = rng.random();
            let report =
                ColonyRound::new(graph, &pheromone, config)?.run(source, destination, round_seed);

            // Zero-cost walks only arise from zero-weight edges; they still
            // count as solutions but carry no deposit.
            let deposits: Vec<AntPath> = report
                .walks
                .iter()
                .filter(|w| w.cost > 0.0)
                .cloned()
                .collect();
            pheromone.update(config.evaporation_rate, &deposits, config.q)?;

            if let Some(round_best) = report.best() {
                if round_best.cost < best_cost {
                    best_cost = round_best.cost;
                    best = Some(round_best.clone());
                }
            }

            arrivals += report.walks.len();
            dead_ends += report.dead_ends;
            cost_history.push(best_cost);

            let stats = RoundStats {
                iteration,
                arrivals: report.walks.len(),
                dead_ends: report.dead_ends,
                round_best: report.best().map(|w| w.cost),
                best_cost,
            };
            debug!(
                iteration,
                arrivals = stats.arrivals,
                dead_ends = stats.dead_ends,
                best_cost,
                "round complete"
            );
            observer.on_round(&stats);
        }

        let iterations = cost_history.len();
        let Some(best) = best else {
            info!(iterations, dead_ends, "no ant reached the destination");
            return Err(AcoError::NoPathFound { iterations });
        };

        info!(
            iterations,
            cost = best.cost,
            hops = best.nodes.len() - 1,
            reason = ?stop_reason,
            "ant colony search finished"
        );

        Ok(AcoResult {
            points: graph.path_points(&best.nodes)?,
            path: best.nodes,
            cost: best.cost,
            iterations,
            stop_reason,
            cancelled: stop_reason == StopReason::Cancelled,
            cost_history,
            arrivals,
            dead_ends,
            pheromone,
        })
    }
}

/// Runs a search with explicit parameters and returns the best path and
/// its cost.
///
/// Shorthand for building an [`AcoConfig`] and calling [`AcoRunner::run`].
#[allow(clippy::too_many_arguments)]
pub fn optimize(
    graph: &WeightedGraph,
    source: NodeId,
    destination: NodeId,
    num_ants: usize,
    iterations: usize,
    evaporation_rate: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
) -> Result<(Vec<NodeId>, f64), AcoError> {
    let config = AcoConfig::default()
        .with_num_ants(num_ants)
        .with_iterations(iterations)
        .with_evaporation_rate(evaporation_rate)
        .with_exponents(alpha, beta, gamma, delta);
    AcoRunner::run(graph, source, destination, &config).map(|r| (r.path, r.cost))
}
