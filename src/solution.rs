//! Result types produced by the heuristics.
//!
//! Each result can check itself against the input it was built from, which is
//! what the tests and the `--verbose` CLI output rely on.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::graph::Graph;
use crate::instance::DistanceMatrix;

/// A vertex coloring; colors are positive integers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    pub colors: BTreeMap<usize, usize>,
}

impl Coloring {
    /// Number of distinct colors used
    pub fn num_colors(&self) -> usize {
        self.colors.values().collect::<BTreeSet<_>>().len()
    }

    pub fn color_of(&self, v: usize) -> Option<usize> {
        self.colors.get(&v).copied()
    }

    /// Every vertex colored and no edge joins two vertices of the same color
    pub fn is_proper(&self, graph: &Graph) -> bool {
        graph.vertices().all(|v| self.colors.contains_key(&v))
            && graph
                .edges()
                .iter()
                .filter(|(u, v)| u != v)
                .all(|(u, v)| self.colors.get(u) != self.colors.get(v))
    }
}

/// A dominating set approximation, members ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominatingSet {
    pub members: Vec<usize>,
    /// Number of candidate evaluations performed
    pub iterations: usize,
}

impl DominatingSet {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every vertex is a member or adjacent to one
    pub fn dominates(&self, graph: &Graph) -> bool {
        let members: HashSet<usize> = self.members.iter().copied().collect();
        graph
            .vertices()
            .all(|v| members.contains(&v) || graph.neighbors(v).any(|u| members.contains(&u)))
    }
}

/// A two-sided vertex partition and its crossing-edge count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cut {
    pub a: BTreeSet<usize>,
    pub b: BTreeSet<usize>,
    pub size: usize,
}

impl Cut {
    /// Edges of `graph` with one endpoint on each side
    pub fn crossing_edges(&self, graph: &Graph) -> usize {
        graph
            .distinct_edges()
            .iter()
            .filter(|(u, v)| {
                (self.a.contains(u) && self.b.contains(v)) || (self.b.contains(u) && self.a.contains(v))
            })
            .count()
    }

    /// `A` and `B` are disjoint and together hold exactly the graph's vertices
    pub fn is_partition(&self, graph: &Graph) -> bool {
        self.a.is_disjoint(&self.b)
            && self.a.len() + self.b.len() == graph.num_vertices()
            && graph.vertices().all(|v| self.a.contains(&v) || self.b.contains(&v))
    }
}

/// A closed tour: `order` starts and ends at `start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub order: Vec<usize>,
    pub cost: f64,
    pub start: usize,
}

impl Tour {
    /// The tour without the closing return to the start
    pub fn visiting_order(&self) -> &[usize] {
        match (self.order.first(), self.order.last()) {
            (Some(first), Some(last)) if first == last => &self.order[..self.order.len() - 1],
            _ => &self.order,
        }
    }

    /// Sum of consecutive distances along `order`, closing edge included
    pub fn recompute_cost(&self, matrix: &DistanceMatrix) -> Option<f64> {
        self.order
            .windows(2)
            .map(|pair| matrix.between(pair[0], pair[1]))
            .sum()
    }

    /// Visits every node once, returns to the start, and the cost adds up
    pub fn is_valid(&self, matrix: &DistanceMatrix) -> bool {
        let visits = self.visiting_order();
        let unique: HashSet<usize> = visits.iter().copied().collect();

        visits.len() == matrix.len()
            && unique.len() == matrix.len()
            && visits.iter().all(|&id| matrix.index_of(id).is_some())
            && self.order.first() == Some(&self.start)
            && self.order.last() == Some(&self.start)
            && self
                .recompute_cost(matrix)
                .map_or(false, |cost| (cost - self.cost).abs() <= 1e-9 * cost.max(1.0))
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.visiting_order().iter().map(|v| v.to_string()).collect();
        write!(f, "{}", ids.join(" "))
    }
}

/// Best tour of a nearest-neighbor run and the cost reached from each start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspOutcome {
    pub best: Tour,
    pub start_costs: Vec<(usize, f64)>,
}

impl TspOutcome {
    pub fn statistics(&self) -> StartStatistics {
        let costs: Vec<f64> = self.start_costs.iter().map(|&(_, c)| c).collect();
        let std_dev = if costs.len() > 1 { costs.iter().std_dev() } else { 0.0 };

        StartStatistics {
            starts: costs.len(),
            mean: costs.iter().mean(),
            std_dev,
            best: costs.iter().cloned().fold(f64::INFINITY, f64::min),
            worst: costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Spread of tour costs over the tried starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartStatistics {
    pub starts: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub best: f64,
    pub worst: f64,
}

impl std::fmt::Display for StartStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Starts tried: {}", self.starts)?;
        writeln!(f, "  Best: {:.2}", self.best)?;
        writeln!(f, "  Mean: {:.2}", self.mean)?;
        writeln!(f, "  Std dev: {:.2}", self.std_dev)?;
        write!(f, "  Worst: {:.2}", self.worst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::TspInstance;

    fn square() -> Graph {
        Graph::from_edges(4, &[(1, 2), (2, 3), (3, 4), (4, 1)])
    }

    #[test]
    fn test_coloring_checks() {
        let graph = square();
        let good = Coloring { colors: [(1, 1), (2, 2), (3, 1), (4, 2)].into_iter().collect() };
        let bad = Coloring { colors: [(1, 1), (2, 1), (3, 2), (4, 2)].into_iter().collect() };
        let partial = Coloring { colors: [(1, 1), (2, 2)].into_iter().collect() };

        assert!(good.is_proper(&graph));
        assert_eq!(good.num_colors(), 2);
        assert!(!bad.is_proper(&graph));
        assert!(!partial.is_proper(&graph));
    }

    #[test]
    fn test_domination_check() {
        let graph = square();
        assert!(DominatingSet { members: vec![1, 3], iterations: 0 }.dominates(&graph));
        assert!(!DominatingSet { members: vec![1], iterations: 0 }.dominates(&graph));
    }

    #[test]
    fn test_cut_checks() {
        let graph = square();
        let cut = Cut {
            a: [1, 3].into_iter().collect(),
            b: [2, 4].into_iter().collect(),
            size: 4,
        };
        assert!(cut.is_partition(&graph));
        assert_eq!(cut.crossing_edges(&graph), 4);

        let overlapping = Cut {
            a: [1, 2, 3].into_iter().collect(),
            b: [3, 4].into_iter().collect(),
            size: 0,
        };
        assert!(!overlapping.is_partition(&graph));
    }

    #[test]
    fn test_tour_visiting_order_and_cost() {
        let instance = TspInstance::from_points("t", &[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 1.0, 0.0)]);
        let matrix = DistanceMatrix::build(&instance, false);
        let tour = Tour { order: vec![1, 3, 2, 1], cost: 20.0, start: 1 };

        assert_eq!(tour.visiting_order(), &[1, 3, 2]);
        assert_eq!(tour.recompute_cost(&matrix), Some(20.0));
        assert!(tour.is_valid(&matrix));
        assert_eq!(tour.to_string(), "1 3 2");

        let open = Tour { order: vec![1, 3, 2], cost: 10.0, start: 1 };
        assert_eq!(open.visiting_order(), &[1, 3, 2]);
        assert!(!open.is_valid(&matrix));
    }

    #[test]
    fn test_start_statistics() {
        let tour = Tour { order: vec![1, 1], cost: 0.0, start: 1 };
        let outcome = TspOutcome {
            best: tour,
            start_costs: vec![(1, 10.0), (2, 20.0), (3, 30.0)],
        };
        let stats = outcome.statistics();

        assert_eq!(stats.starts, 3);
        assert!((stats.mean - 20.0).abs() < 1e-12);
        assert!((stats.std_dev - 10.0).abs() < 1e-12);
        assert_eq!(stats.best, 10.0);
        assert_eq!(stats.worst, 30.0);
    }
}
