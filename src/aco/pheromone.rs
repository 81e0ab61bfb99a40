//! Per-edge pheromone levels.

use crate::error::AcoError;
use crate::graph::{EdgeKey, NodeId, WeightedGraph};
use std::collections::HashMap;

use super::ant::AntPath;

const DEFAULT_FLOOR: f64 = 1e-12;

/// Pheromone intensity for every edge of a graph.
///
/// Keys are canonical [`EdgeKey`]s, so `level(a, b) == level(b, a)`.
/// Levels are kept at or above a positive floor.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    levels: HashMap<EdgeKey, f64>,
    floor: f64,
}

impl PheromoneField {
    /// Every edge of `graph` at level `1.0`.
    pub fn initialize(graph: &WeightedGraph) -> Self {
        Self::with_level(graph, 1.0)
    }

    /// Every edge of `graph` at `level`.
    ///
    /// A non-positive or non-finite `level` is replaced by the floor.
    pub fn with_level(graph: &WeightedGraph, level: f64) -> Self {
        let floor = DEFAULT_FLOOR;
        let level = if level.is_finite() && level > 0.0 {
            level
        } else {
            floor
        };
        Self {
            levels: graph.edges().map(|(key, _)| (key, level)).collect(),
            floor,
        }
    }

    /// Sets the lower bound applied by [`evaporate`](Self::evaporate) and
    /// raises any level already below it.
    ///
    /// A non-positive or non-finite `floor` is ignored.
    pub fn with_floor(mut self, floor: f64) -> Self {
        if floor.is_finite() && floor > 0.0 {
            self.floor = floor;
            for level in self.levels.values_mut() {
                *level = level.max(floor);
            }
        }
        self
    }

    /// Level of the edge between `a` and `b`.
    pub fn level(&self, a: NodeId, b: NodeId) -> Result<f64, AcoError> {
        self.levels
            .get(&EdgeKey::new(a, b))
            .copied()
            .ok_or(AcoError::MissingEdge { from: a, to: b })
    }

    /// Multiplies every level by `1 - rate`, then clamps to the floor.
    ///
    /// `rate` is expected in `[0, 1)`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        let floor = self.floor;
        for level in self.levels.values_mut() {
            *level = (*level * keep).max(floor);
        }
    }

    /// Adds `q / cost` to every edge along `path`.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if `cost` or `q` is not positive and finite,
    /// [`AcoError::MissingEdge`] if two consecutive nodes are not adjacent.
    /// Nothing is written on error.
    pub fn deposit(&mut self, path: &[NodeId], cost: f64, q: f64) -> Result<(), AcoError> {
        self.check_deposit(path, cost, q)?;
        let amount = q / cost;
        for pair in path.windows(2) {
            if let Some(level) = self.levels.get_mut(&EdgeKey::new(pair[0], pair[1])) {
                *level += amount;
            }
        }
        Ok(())
    }

    /// One round's update: evaporation over all edges, then a deposit
    /// for every walk.
    ///
    /// All walks are checked before anything is written, so on error the
    /// field is left exactly as it was.
    pub fn update(&mut self, rate: f64, walks: &[AntPath], q: f64) -> Result<(), AcoError> {
        for walk in walks {
            self.check_deposit(&walk.nodes, walk.cost, q)?;
        }
        self.evaporate(rate);
        for walk in walks {
            self.deposit(&walk.nodes, walk.cost, q)?;
        }
        Ok(())
    }

    fn check_deposit(&self, path: &[NodeId], cost: f64, q: f64) -> Result<(), AcoError> {
        if !q.is_finite() || q <= 0.0 {
            return Err(AcoError::invalid(format!(
                "deposit constant must be positive and finite, got {q}"
            )));
        }
        if !cost.is_finite() || cost <= 0.0 {
            return Err(AcoError::invalid(format!(
                "deposit cost must be positive and finite, got {cost}"
            )));
        }
        for pair in path.windows(2) {
            if !self.levels.contains_key(&EdgeKey::new(pair[0], pair[1])) {
                return Err(AcoError::MissingEdge {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }
        Ok(())
    }

    /// Number of edges tracked.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Smallest level, or `None` for an edgeless graph.
    pub fn min_level(&self) -> Option<f64> {
        self.levels.values().copied().reduce(f64::min)
    }

    /// Largest level, or `None` for an edgeless graph.
    pub fn max_level(&self) -> Option<f64> {
        self.levels.values().copied().reduce(f64::max)
    }

    /// All edges with their levels.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.levels.iter().map(|(&k, &v)| (k, v))
    }
}
