//! Heuristics module.
//!
//! Graph engines implement [`GraphHeuristic`]; the TSP engine works on a
//! [`DistanceMatrix`](crate::instance::DistanceMatrix) instead of a graph.

pub mod coloring;
pub mod construction;
pub mod dominating_set;
pub mod max_cut;

pub use coloring::*;
pub use construction::*;
pub use dominating_set::*;
pub use max_cut::*;

use crate::graph::Graph;

/// A greedy heuristic over an undirected graph
pub trait GraphHeuristic {
    type Output;

    fn solve(&self, graph: &Graph) -> Self::Output;
    fn name(&self) -> &str;
}
