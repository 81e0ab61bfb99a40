//! Ant Colony Optimization (ACO) path search.
//!
//! A colony of stochastic walkers searches for a cheap path between two
//! nodes of a [`WeightedGraph`](crate::graph::WeightedGraph). Each ant
//! moves to unvisited neighbors with probability proportional to
//!
//! ```text
//! tau(i,j)^alpha * (1 / d(i,j))^beta * attr(j)^gamma * (1 / d_origin(i))^delta
//! ```
//!
//! After every round all edges evaporate and each successful ant deposits
//! `Q / cost` on the edges it walked.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony size, round budget, evaporation and exponents
//! - [`AcoRunner`]: Executes the round loop
//! - [`AcoResult`]: Best path found with run statistics
//! - [`PheromoneField`]: Per-edge pheromone levels
//! - [`AntWalker`]: Movement policy of a single ant
//! - [`ColonyRound`]: One batch of ants over a fixed pheromone snapshot
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod cache;
mod colony;
mod config;
mod pheromone;
mod runner;

pub use ant::{AntPath, AntWalker, Candidate, WalkOutcome};
pub use cache::RoundCache;
pub use colony::{ColonyRound, RoundReport};
pub use config::{AcoConfig, Exponents};
pub use pheromone::PheromoneField;
pub use runner::{optimize, AcoResult, AcoRunner, RoundObserver, RoundStats, StopReason};
