//! Round-scoped lookup table for movement scores.

use super::config::Exponents;
use super::pheromone::PheromoneField;
use crate::error::AcoError;
use crate::graph::{EdgeKey, NodeId, WeightedGraph};
use std::collections::HashMap;

/// Raises `base` to `exp`, treating a zero exponent as a disabled factor.
#[inline]
pub(crate) fn factor(base: f64, exp: f64) -> f64 {
    if exp == 0.0 {
        1.0
    } else {
        base.powf(exp)
    }
}

/// Score components precomputed from one pheromone snapshot.
///
/// Built at the start of a round and dropped with it, so nothing computed
/// here outlives the pheromone levels it was derived from.
#[derive(Debug, Clone)]
pub struct RoundCache {
    /// `tau^alpha * (1/d)^beta` per edge.
    edge: HashMap<EdgeKey, f64>,
    /// `attr^gamma` per node.
    attraction: Vec<f64>,
    /// `(1/d_origin)^delta` per node.
    origin: Vec<f64>,
}

impl RoundCache {
    /// Precomputes every factor of the movement rule.
    ///
    /// # Errors
    ///
    /// [`AcoError::MissingDistanceToOrigin`] if `delta > 0` and the graph
    /// has no distance-to-origin table; [`AcoError::MissingEdge`] if the
    /// pheromone field does not cover the graph.
    pub fn build(
        graph: &WeightedGraph,
        pheromone: &PheromoneField,
        exponents: &Exponents,
    ) -> Result<Self, AcoError> {
        let mut edge = HashMap::with_capacity(graph.edge_count());
        for (key, weight) in graph.edges() {
            let (a, b) = key.endpoints();
            let tau = pheromone.level(a, b)?;
            let eta = 1.0 / weight;
            edge.insert(key, factor(tau, exponents.alpha) * factor(eta, exponents.beta));
        }

        let mut attraction = Vec::with_capacity(graph.node_count());
        let mut origin = Vec::with_capacity(graph.node_count());
        for id in graph.node_ids() {
            attraction.push(factor(graph.normalized_attractiveness(id)?, exponents.gamma));
            let o = if exponents.delta == 0.0 {
                1.0
            } else {
                factor(1.0 / graph.distance_to_origin(id)?, exponents.delta)
            };
            origin.push(o);
        }

        Ok(Self {
            edge,
            attraction,
            origin,
        })
    }

    /// Unnormalized desirability of stepping from `current` to `next`.
    ///
    /// Zero when the edge or either node is unknown.
    pub fn score(&self, current: NodeId, next: NodeId) -> f64 {
        let edge = self
            .edge
            .get(&EdgeKey::new(current, next))
            .copied()
            .unwrap_or(0.0);
        let attraction = self.attraction.get(next.index()).copied().unwrap_or(0.0);
        let origin = self.origin.get(current.index()).copied().unwrap_or(0.0);
        edge * attraction * origin
    }
}
