//! Ant Colony Optimization path search over weighted graphs.
//!
//! Finds a low-cost path between two nodes by simulating many stochastic
//! walkers ("ants") whose moves are biased by a shared, evaporating
//! pheromone field and by static weights:
//!
//! - **Distance**: shorter edges are preferred.
//! - **Attractiveness**: a per-node score (e.g. population served),
//!   calibrated onto `[0, 1]`.
//! - **Distance to origin**: a per-node bias relative to a designated
//!   origin node.
//!
//! # Modules
//!
//! - [`graph`]: Node, edge and graph model, including complete-graph
//!   construction from points and nearest-node lookup.
//! - [`aco`]: Pheromone field, ant movement policy, colony rounds and the
//!   outer optimization loop.
//! - [`error`]: The [`AcoError`] type.
//!
//! # Architecture
//!
//! The crate covers the search engine only. It contains no geographic
//! data loading or presentation; callers supply a populated graph and
//! render the returned path.
//!
//! # Example
//!
//! ```
//! use u_aco::aco::{AcoConfig, AcoRunner};
//! use u_aco::graph::{Node, WeightedGraph};
//!
//! let graph = WeightedGraph::complete([
//!     Node::at(0.0, 0.0),
//!     Node::at(1.0, 0.2),
//!     Node::at(2.0, 0.0),
//! ]);
//! let source = graph.closest_node((0.0, 0.0).into()).unwrap();
//! let destination = graph.closest_node((2.1, 0.0).into()).unwrap();
//!
//! let config = AcoConfig::classic().with_num_ants(10).with_iterations(20).with_seed(7);
//! let result = AcoRunner::run(&graph, source, destination, &config).unwrap();
//! assert_eq!(result.path.first(), Some(&source));
//! assert_eq!(result.path.last(), Some(&destination));
//! ```

pub mod aco;
pub mod error;
pub mod graph;

pub use error::AcoError;
