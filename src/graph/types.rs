//! Node, point and edge-key types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower calibration bound for raw attractiveness values.
pub const ATTRACTIVENESS_MIN_REF: f64 = 6.0;

/// Upper calibration bound for raw attractiveness values.
pub const ATTRACTIVENESS_MAX_REF: f64 = 150.0;

/// Raw attractiveness assumed for nodes that carry none.
pub const NEUTRAL_ATTRACTIVENESS: f64 = 60.0;

/// Stable identifier of a node inside a [`WeightedGraph`](super::WeightedGraph).
///
/// Ids are dense indices assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the underlying index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// How desirable a node is as a stop, independent of distance.
///
/// Raw values are mapped onto `[0, 1]` with the fixed calibration bounds
/// [`ATTRACTIVENESS_MIN_REF`] and [`ATTRACTIVENESS_MAX_REF`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Attractiveness {
    /// Uncalibrated value (e.g. a population count).
    Raw(f64),
    /// Value already in `[0, 1]`.
    Normalized(f64),
}

impl Attractiveness {
    /// Normalized value, clamped to `[0, 1]`.
    pub fn normalized(self) -> f64 {
        let v = match self {
            Attractiveness::Raw(raw) => {
                (raw - ATTRACTIVENESS_MIN_REF) / (ATTRACTIVENESS_MAX_REF - ATTRACTIVENESS_MIN_REF)
            }
            Attractiveness::Normalized(v) => v,
        };
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}

impl Default for Attractiveness {
    fn default() -> Self {
        Attractiveness::Raw(NEUTRAL_ATTRACTIVENESS)
    }
}

/// A graph node as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Optional external key (e.g. a bus stop reference).
    pub label: Option<String>,
    pub position: Point,
    /// `None` falls back to [`NEUTRAL_ATTRACTIVENESS`].
    pub attractiveness: Option<Attractiveness>,
}

impl Node {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_attractiveness(mut self, attractiveness: Attractiveness) -> Self {
        self.attractiveness = Some(attractiveness);
        self
    }

    /// Attractiveness mapped onto `[0, 1]`.
    pub fn normalized_attractiveness(&self) -> f64 {
        self.attractiveness.unwrap_or_default().normalized()
    }
}

/// Undirected edge key, stored as `(min, max)` so either orientation
/// resolves to the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    /// Both endpoints, smaller id first.
    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }
}

/// An adjacency entry: the node on the other side and the edge weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
}
