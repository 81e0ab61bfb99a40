//! Undirected weighted graph with per-node search attributes.

use super::types::{EdgeKey, Neighbor, Node, NodeId, Point};
use crate::error::AcoError;
use std::collections::HashMap;

/// Incrementally assembles a [`WeightedGraph`].
///
/// Use this when the caller already has a sparse network (e.g. a road
/// graph). For a complete graph over a point set, see
/// [`WeightedGraph::complete`].
///
/// # Examples
///
/// ```
/// use u_aco::graph::{GraphBuilder, Node};
///
/// let mut builder = GraphBuilder::new();
/// let a = builder.add_node(Node::at(0.0, 0.0));
/// let b = builder.add_node(Node::at(1.0, 0.0));
/// builder.add_edge(a, b, 1.0).unwrap();
/// let graph = builder.build();
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Neighbor>>,
    weights: HashMap<EdgeKey, f64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        id
    }

    /// Adds an undirected edge with an externally supplied weight.
    ///
    /// Re-adding an existing edge replaces its weight.
    ///
    /// # Errors
    ///
    /// [`AcoError::UnknownNode`] if either endpoint is missing,
    /// [`AcoError::InvalidParameter`] for self-loops and negative or
    /// non-finite weights.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<(), AcoError> {
        for id in [a, b] {
            if id.index() >= self.nodes.len() {
                return Err(AcoError::UnknownNode(id));
            }
        }
        if a == b {
            return Err(AcoError::invalid(format!("self-loop on {a}")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(AcoError::invalid(format!(
                "edge {a}-{b} has weight {weight}, expected a finite non-negative value"
            )));
        }

        let key = EdgeKey::new(a, b);
        if self.weights.insert(key, weight).is_some() {
            for (from, to) in [(a, b), (b, a)] {
                if let Some(entry) = self.adjacency[from.index()]
                    .iter_mut()
                    .find(|n| n.node == to)
                {
                    entry.weight = weight;
                }
            }
        } else {
            self.adjacency[a.index()].push(Neighbor { node: b, weight });
            self.adjacency[b.index()].push(Neighbor { node: a, weight });
        }
        Ok(())
    }

    /// Adds an edge weighted by the Euclidean distance between the endpoints.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<(), AcoError> {
        let pa = self.nodes.get(a.index()).ok_or(AcoError::UnknownNode(a))?.position;
        let pb = self.nodes.get(b.index()).ok_or(AcoError::UnknownNode(b))?.position;
        self.add_edge(a, b, pa.distance(&pb))
    }

    pub fn build(self) -> WeightedGraph {
        let labels = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.label.clone().map(|l| (l, NodeId(i))))
            .collect();
        WeightedGraph {
            nodes: self.nodes,
            adjacency: self.adjacency,
            weights: self.weights,
            labels,
            origin: None,
            distance_to_origin: Vec::new(),
        }
    }
}

/// Undirected graph read by the ants.
///
/// The shape (nodes and edges) is fixed once built. The only mutable
/// state is the distance-to-origin table, filled by
/// [`compute_distance_to_origin`](Self::compute_distance_to_origin).
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Neighbor>>,
    weights: HashMap<EdgeKey, f64>,
    labels: HashMap<String, NodeId>,
    origin: Option<NodeId>,
    distance_to_origin: Vec<f64>,
}

impl WeightedGraph {
    /// Builds a complete graph over `nodes`, one edge per unordered pair,
    /// weighted by Euclidean distance.
    pub fn complete(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut builder = GraphBuilder::new();
        let ids: Vec<NodeId> = nodes.into_iter().map(|n| builder.add_node(n)).collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let pa = builder.nodes[a.index()].position;
                let pb = builder.nodes[b.index()].position;
                let d = pa.distance(&pb);
                // Positions are finite for any sane input; skip pairs that are not.
                if d.is_finite() {
                    builder.weights.insert(EdgeKey::new(a, b), d);
                    builder.adjacency[a.index()].push(Neighbor { node: b, weight: d });
                    builder.adjacency[b.index()].push(Neighbor { node: a, weight: d });
                }
            }
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, AcoError> {
        self.nodes.get(id.index()).ok_or(AcoError::UnknownNode(id))
    }

    /// Iterates over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Neighbors of `id` in insertion order. Empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        match self.adjacency.get(id.index()) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Weight of the edge between `a` and `b`, in either orientation.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.weights.get(&EdgeKey::new(a, b)).copied()
    }

    /// All edges with their weights.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.weights.iter().map(|(&k, &w)| (k, w))
    }

    pub fn position(&self, id: NodeId) -> Result<Point, AcoError> {
        self.node(id).map(|n| n.position)
    }

    /// Attractiveness of `id` mapped onto `[0, 1]`.
    pub fn normalized_attractiveness(&self, id: NodeId) -> Result<f64, AcoError> {
        self.node(id).map(Node::normalized_attractiveness)
    }

    /// Looks up a node by its external label.
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// The node nearest to `point`, or `None` for an empty graph.
    pub fn closest_node(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i), n.position.distance(&point)))
            .filter(|(_, d)| !d.is_nan())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Computes every node's Euclidean distance to `origin`.
    ///
    /// The origin itself, and any node sitting exactly on it, gets the
    /// sentinel distance `1.0` so that `1 / distance` stays finite.
    /// Replaces the result of any earlier call.
    pub fn compute_distance_to_origin(&mut self, origin: NodeId) -> Result<(), AcoError> {
        let anchor = self.position(origin)?;
        self.distance_to_origin = self
            .nodes
            .iter()
            .map(|n| {
                let d = n.position.distance(&anchor);
                if d > 0.0 {
                    d
                } else {
                    1.0
                }
            })
            .collect();
        self.origin = Some(origin);
        Ok(())
    }

    /// The origin used by the last distance-to-origin pass.
    pub fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    /// Distance from `id` to the active origin.
    ///
    /// # Errors
    ///
    /// [`AcoError::MissingDistanceToOrigin`] if the pass has not run.
    pub fn distance_to_origin(&self, id: NodeId) -> Result<f64, AcoError> {
        if self.origin.is_none() {
            return Err(AcoError::MissingDistanceToOrigin);
        }
        self.distance_to_origin
            .get(id.index())
            .copied()
            .ok_or(AcoError::UnknownNode(id))
    }

    /// Sum of edge weights along `path`.
    pub fn path_cost(&self, path: &[NodeId]) -> Result<f64, AcoError> {
        path.windows(2).try_fold(0.0, |acc, pair| {
            self.weight(pair[0], pair[1])
                .map(|w| acc + w)
                .ok_or(AcoError::MissingEdge {
                    from: pair[0],
                    to: pair[1],
                })
        })
    }

    /// Positions of the nodes along `path`.
    pub fn path_points(&self, path: &[NodeId]) -> Result<Vec<Point>, AcoError> {
        path.iter().map(|&id| self.position(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Attractiveness;

    fn square() -> WeightedGraph {
        WeightedGraph::complete([
            Node::at(0.0, 0.0).with_label("a"),
            Node::at(3.0, 0.0).with_label("b"),
            Node::at(3.0, 4.0).with_label("c"),
            Node::at(0.0, 4.0).with_label("d"),
        ])
    }

    #[test]
    fn test_complete_graph_shape() {
        let g = square();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 6);
        for id in g.node_ids() {
            assert_eq!(g.neighbors(id).len(), 3);
        }
    }

    #[test]
    fn test_weight_symmetric() {
        let g = square();
        let a = NodeId(0);
        let c = NodeId(2);
        assert_eq!(g.weight(a, c), Some(5.0));
        assert_eq!(g.weight(c, a), Some(5.0));
    }

    #[test]
    fn test_builder_rejects_negative_weight() {
        let mut b = GraphBuilder::new();
        let x = b.add_node(Node::default());
        let y = b.add_node(Node::default());
        assert!(matches!(
            b.add_edge(x, y, -1.0),
            Err(AcoError::InvalidParameter(_))
        ));
        assert!(matches!(
            b.add_edge(x, y, f64::NAN),
            Err(AcoError::InvalidParameter(_))
        ));
        assert!(matches!(
            b.add_edge(x, x, 1.0),
            Err(AcoError::InvalidParameter(_))
        ));
        assert!(matches!(
            b.add_edge(x, NodeId(9), 1.0),
            Err(AcoError::UnknownNode(NodeId(9)))
        ));
    }

    #[test]
    fn test_builder_replaces_duplicate_edge() {
        let mut b = GraphBuilder::new();
        let x = b.add_node(Node::default());
        let y = b.add_node(Node::default());
        b.add_edge(x, y, 2.0).unwrap();
        b.add_edge(y, x, 7.0).unwrap();
        let g = b.build();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(x).len(), 1);
        assert_eq!(g.neighbors(x)[0].weight, 7.0);
        assert_eq!(g.neighbors(y)[0].weight, 7.0);
    }

    #[test]
    fn test_distance_to_origin_requires_pass() {
        let mut g = square();
        assert_eq!(
            g.distance_to_origin(NodeId(1)),
            Err(AcoError::MissingDistanceToOrigin)
        );

        g.compute_distance_to_origin(NodeId(0)).unwrap();
        assert_eq!(g.origin(), Some(NodeId(0)));
        assert_eq!(g.distance_to_origin(NodeId(0)), Ok(1.0));
        assert_eq!(g.distance_to_origin(NodeId(1)), Ok(3.0));
        assert_eq!(g.distance_to_origin(NodeId(2)), Ok(5.0));
    }

    #[test]
    fn test_closest_node_and_labels() {
        let g = square();
        assert_eq!(g.closest_node(Point::new(2.9, 3.5)), Some(NodeId(2)));
        assert_eq!(g.node_by_label("d"), Some(NodeId(3)));
        assert_eq!(g.node_by_label("zz"), None);
        assert_eq!(WeightedGraph::complete(Vec::<Node>::new()).closest_node(Point::default()), None);
    }

    #[test]
    fn test_path_cost_and_points() {
        let g = square();
        let path = [NodeId(0), NodeId(1), NodeId(2)];
        assert!((g.path_cost(&path).unwrap() - 7.0).abs() < 1e-12);
        let points = g.path_points(&path).unwrap();
        assert_eq!(points[2], Point::new(3.0, 4.0));

        let mut b = GraphBuilder::new();
        let x = b.add_node(Node::default());
        let y = b.add_node(Node::default());
        let sparse = b.build();
        assert_eq!(
            sparse.path_cost(&[x, y]),
            Err(AcoError::MissingEdge { from: x, to: y })
        );
    }

    #[test]
    fn test_attractiveness_lookup() {
        let mut b = GraphBuilder::new();
        let x = b.add_node(Node::default().with_attractiveness(Attractiveness::Raw(150.0)));
        let g = b.build();
        assert_eq!(g.normalized_attractiveness(x), Ok(1.0));
        assert!(g.normalized_attractiveness(NodeId(4)).is_err());
    }
}
