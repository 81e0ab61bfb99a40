//! Single-ant movement policy.
//!
//! An ant starts at the source and repeatedly moves to an unvisited
//! neighbor drawn from the distribution produced by
//! [`AntWalker::probabilities`], until it reaches the destination or runs
//! out of unvisited neighbors.

use super::cache::RoundCache;
use crate::graph::{NodeId, WeightedGraph};
use rand::Rng;
use tracing::trace;

/// A completed walk from source to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct AntPath {
    /// Visited nodes in order, no repeats.
    pub nodes: Vec<NodeId>,
    /// Sum of traversed edge weights.
    pub cost: f64,
}

/// How a single walk ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutcome {
    /// The ant reached the destination.
    Arrived(AntPath),
    /// Every neighbor of `at` was already visited.
    DeadEnd {
        /// Node where the ant got stuck.
        at: NodeId,
        /// Steps taken before getting stuck.
        steps: usize,
    },
}

/// A possible next step and its selection probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    /// Weight of the edge leading to `node`.
    pub weight: f64,
    pub probability: f64,
}

/// Movement policy of one ant over a fixed pheromone snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AntWalker<'a> {
    graph: &'a WeightedGraph,
    cache: &'a RoundCache,
}

impl<'a> AntWalker<'a> {
    pub fn new(graph: &'a WeightedGraph, cache: &'a RoundCache) -> Self {
        Self { graph, cache }
    }

    /// Selection distribution over the unvisited neighbors of `current`,
    /// in neighbor-enumeration order.
    ///
    /// `visited` is indexed by node id. Returns an empty vector when no
    /// unvisited neighbor exists. Otherwise the probabilities sum to 1:
    ///
    /// - infinite scores (zero-length edges) share the mass uniformly;
    /// - if every score is zero the distribution is uniform.
    pub fn probabilities(&self, current: NodeId, visited: &[bool]) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .graph
            .neighbors(current)
            .iter()
            .filter(|n| !visited.get(n.node.index()).copied().unwrap_or(true))
            .map(|n| {
                let score = self.cache.score(current, n.node);
                Candidate {
                    node: n.node,
                    weight: n.weight,
                    probability: if score.is_nan() || score < 0.0 { 0.0 } else { score },
                }
            })
            .collect();

        if candidates.is_empty() {
            return candidates;
        }

        let infinite = candidates
            .iter()
            .filter(|c| c.probability.is_infinite())
            .count();
        if infinite > 0 {
            let share = 1.0 / infinite as f64;
            for c in &mut candidates {
                c.probability = if c.probability.is_infinite() { share } else { 0.0 };
            }
            return candidates;
        }

        let max = candidates.iter().map(|c| c.probability).fold(0.0, f64::max);
        if max <= 0.0 {
            trace!(node = %current, "zero probability mass, falling back to uniform");
            let share = 1.0 / candidates.len() as f64;
            for c in &mut candidates {
                c.probability = share;
            }
            return candidates;
        }

        // Scale by the max first so the sum cannot overflow.
        let total: f64 = candidates.iter().map(|c| c.probability / max).sum();
        for c in &mut candidates {
            c.probability = c.probability / max / total;
        }
        candidates
    }

    /// Roulette-wheel selection over `candidates`.
    ///
    /// Draws `u` in `[0, 1)` and returns the first candidate whose
    /// cumulative probability reaches `u`. If rounding leaves the draw
    /// unmatched, picks uniformly among the candidates with non-zero
    /// probability (or among all of them if none has any). `None` only
    /// when `candidates` is empty.
    pub fn choose_next<R: Rng>(&self, candidates: &[Candidate], rng: &mut R) -> Option<Candidate> {
        if candidates.is_empty() {
            return None;
        }
        let draw: f64 = rng.random();
        let mut cumulative = 0.0;
        for c in candidates {
            cumulative += c.probability;
            if c.probability > 0.0 && cumulative >= draw {
                return Some(*c);
            }
        }
        let live: Vec<&Candidate> = candidates.iter().filter(|c| c.probability > 0.0).collect();
        if live.is_empty() {
            let i = rng.random_range(0..candidates.len());
            return Some(candidates[i]);
        }
        let i = rng.random_range(0..live.len());
        Some(*live[i])
    }

    /// Walks from `source` until `destination` is reached or the ant is stuck.
    ///
    /// Each step visits a new node, so a walk never exceeds
    /// `node_count - 1` steps.
    pub fn walk<R: Rng>(&self, source: NodeId, destination: NodeId, rng: &mut R) -> WalkOutcome {
        if !self.graph.contains(source) {
            return WalkOutcome::DeadEnd {
                at: source,
                steps: 0,
            };
        }

        let mut visited = vec![false; self.graph.node_count()];
        visited[source.index()] = true;
        let mut nodes = vec![source];
        let mut cost = 0.0;
        let mut current = source;

        while current != destination {
            let candidates = self.probabilities(current, &visited);
            let Some(next) = self.choose_next(&candidates, rng) else {
                trace!(node = %current, steps = nodes.len() - 1, "ant reached a dead end");
                return WalkOutcome::DeadEnd {
                    at: current,
                    steps: nodes.len() - 1,
                };
            };
            visited[next.node.index()] = true;
            nodes.push(next.node);
            cost += next.weight;
            current = next.node;
        }

        WalkOutcome::Arrived(AntPath { nodes, cost })
    }
}
