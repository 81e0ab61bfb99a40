//! Error type shared by the graph model and the ACO engine.
//!
//! Only failures that cross the engine boundary live here. Conditions
//! local to a single ant (dead ends, zero probability mass) are absorbed
//! inside a colony round and never surface as errors.

use crate::graph::NodeId;
use thiserror::Error;

/// Errors surfaced by graph construction and [`AcoRunner`](crate::aco::AcoRunner).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// No ant reached the destination in any round.
    #[error("no path found from source to destination after {iterations} iterations")]
    NoPathFound {
        /// Number of rounds executed before giving up.
        iterations: usize,
    },

    /// A configuration value or graph weight is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// `delta > 0` was requested before distances to an origin were computed.
    #[error("distance-to-origin has not been computed for this graph")]
    MissingDistanceToOrigin,

    /// Two nodes expected to be adjacent are not connected.
    #[error("no edge between {from} and {to}")]
    MissingEdge {
        /// First endpoint.
        from: NodeId,
        /// Second endpoint.
        to: NodeId,
    },

    /// A node id does not belong to the graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

impl AcoError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AcoError::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AcoError::NoPathFound { iterations: 20 };
        assert_eq!(
            err.to_string(),
            "no path found from source to destination after 20 iterations"
        );

        let err = AcoError::MissingEdge {
            from: NodeId(1),
            to: NodeId(3),
        };
        assert_eq!(err.to_string(), "no edge between n1 and n3");

        let err = AcoError::invalid("num_ants must be positive");
        assert_eq!(err.to_string(), "invalid parameter: num_ants must be positive");
    }
}
