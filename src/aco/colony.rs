//! One round of the colony: many independent walks over a fixed snapshot.

use super::ant::{AntPath, AntWalker, WalkOutcome};
use super::cache::RoundCache;
use super::config::AcoConfig;
use super::pheromone::PheromoneField;
use crate::error::AcoError;
use crate::graph::{NodeId, WeightedGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Walks collected in one round.
#[derive(Debug, Clone, Default)]
pub struct RoundReport {
    /// Walks that reached the destination, in ant order.
    pub walks: Vec<AntPath>,
    /// Ants that got stuck before reaching the destination.
    pub dead_ends: usize,
}

impl RoundReport {
    /// The cheapest walk of the round; the earliest wins ties.
    pub fn best(&self) -> Option<&AntPath> {
        self.walks.iter().fold(None, |best: Option<&AntPath>, w| match best {
            Some(b) if b.cost <= w.cost => Some(b),
            _ => Some(w),
        })
    }
}

/// A batch of ants reading one pheromone snapshot.
///
/// The snapshot is borrowed immutably for the whole round, so no ant can
/// observe another's deposits.
pub struct ColonyRound<'a> {
    graph: &'a WeightedGraph,
    cache: RoundCache,
    num_ants: usize,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<'a> ColonyRound<'a> {
    /// Prepares a round, building its score cache from `pheromone`.
    pub fn new(
        graph: &'a WeightedGraph,
        pheromone: &PheromoneField,
        config: &AcoConfig,
    ) -> Result<Self, AcoError> {
        Ok(Self {
            graph,
            cache: RoundCache::build(graph, pheromone, &config.exponents)?,
            num_ants: config.num_ants,
            parallel: config.parallel,
        })
    }

    /// Releases every ant from `source` towards `destination`.
    ///
    /// Ant `k` draws from its own generator seeded by `round_seed` and
    /// `k`, so the report does not depend on execution order.
    pub fn run(&self, source: NodeId, destination: NodeId, round_seed: u64) -> RoundReport {
        let outcomes = self.walk_all(source, destination, round_seed);

        let mut report = RoundReport::default();
        for outcome in outcomes {
            match outcome {
                WalkOutcome::Arrived(path) => report.walks.push(path),
                WalkOutcome::DeadEnd { at, steps } => {
                    trace!(node = %at, steps, "discarding dead-ended ant");
                    report.dead_ends += 1;
                }
            }
        }
        report
    }

    fn walk_one(&self, ant: usize, source: NodeId, destination: NodeId, round_seed: u64) -> WalkOutcome {
        let mut rng = StdRng::seed_from_u64(ant_seed(round_seed, ant));
        AntWalker::new(self.graph, &self.cache).walk(source, destination, &mut rng)
    }

    #[cfg(feature = "parallel")]
    fn walk_all(&self, source: NodeId, destination: NodeId, round_seed: u64) -> Vec<WalkOutcome> {
        if self.parallel {
            (0..self.num_ants)
                .into_par_iter()
                .map(|ant| self.walk_one(ant, source, destination, round_seed))
                .collect()
        } else {
            (0..self.num_ants)
                .map(|ant| self.walk_one(ant, source, destination, round_seed))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn walk_all(&self, source: NodeId, destination: NodeId, round_seed: u64) -> Vec<WalkOutcome> {
        (0..self.num_ants)
            .map(|ant| self.walk_one(ant, source, destination, round_seed))
            .collect()
    }
}

/// Mixes the ant index into the round seed (splitmix64 finalizer).
fn ant_seed(round_seed: u64, ant: usize) -> u64 {
    let mut z = round_seed.wrapping_add((ant as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
