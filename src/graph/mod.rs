//! Weighted graph model searched by the colony.
//!
//! Nodes carry a position, an attractiveness score and, once
//! [`WeightedGraph::compute_distance_to_origin`] has run, their distance
//! to a designated origin. Edges are undirected and non-negatively
//! weighted.
//!
//! Two construction paths are supported:
//!
//! - [`WeightedGraph::complete`]: every unordered pair of points joined by
//!   its Euclidean distance.
//! - [`GraphBuilder`]: a pre-built sparse network with caller-supplied
//!   weights.

mod types;
mod weighted;

pub use types::{
    Attractiveness, EdgeKey, Neighbor, Node, NodeId, Point, ATTRACTIVENESS_MAX_REF,
    ATTRACTIVENESS_MIN_REF, NEUTRAL_ATTRACTIVENESS,
};
pub use weighted::{GraphBuilder, WeightedGraph};
