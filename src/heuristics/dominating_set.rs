//! Greedy minimum dominating set.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Graph;
use crate::heuristics::GraphHeuristic;
use crate::solution::DominatingSet;

/// Greedy max-new-coverage dominating set
///
/// Every iteration takes the candidate with the most undominated neighbors
/// (lowest id on ties), adds it to the set if that still covers anything, and
/// drops it from the pool either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyDominatingSet;

impl GreedyDominatingSet {
    pub fn new() -> Self {
        GreedyDominatingSet
    }

    fn undominated_neighbors(graph: &Graph, dominated: &BTreeMap<usize, bool>, v: usize) -> usize {
        graph
            .neighbors(v)
            .filter(|u| !dominated.get(u).copied().unwrap_or(false))
            .count()
    }

    /// First candidate (ascending id) with the strictly greatest count
    fn select(graph: &Graph, candidates: &BTreeSet<usize>, dominated: &BTreeMap<usize, bool>) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for &v in candidates {
            let count = Self::undominated_neighbors(graph, dominated, v);
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((v, count));
            }
        }

        best.map(|(v, _)| v)
    }
}

impl GraphHeuristic for GreedyDominatingSet {
    type Output = DominatingSet;

    fn solve(&self, graph: &Graph) -> DominatingSet {
        let mut candidates: BTreeSet<usize> = graph.vertices().collect();
        let mut dominated: BTreeMap<usize, bool> = graph.vertices().map(|v| (v, false)).collect();
        let mut members = BTreeSet::new();
        let mut iterations = 0;

        while let Some(v) = Self::select(graph, &candidates, &dominated) {
            iterations += 1;

            let needs_insert = !dominated[&v] || Self::undominated_neighbors(graph, &dominated, v) > 0;
            if needs_insert {
                members.insert(v);
                dominated.insert(v, true);
                for u in graph.neighbors(v) {
                    dominated.insert(u, true);
                }
            } else {
                log::debug!("vertex {} adds no coverage, discarded", v);
            }

            candidates.remove(&v);
        }

        DominatingSet {
            members: members.into_iter().collect(),
            iterations,
        }
    }

    fn name(&self) -> &str {
        "GreedyDominatingSet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_four_cycle() {
        let graph = Graph::from_edges(4, &[(1, 2), (2, 3), (3, 4), (4, 1)]);
        let set = GreedyDominatingSet::new().solve(&graph);

        assert_eq!(set.members, vec![1, 2]);
        assert_eq!(set.iterations, 4);
        assert!(set.dominates(&graph));
    }

    #[test]
    fn test_star_takes_the_centre() {
        let graph = Graph::from_edges(5, &[(3, 1), (3, 2), (3, 4), (3, 5)]);
        let set = GreedyDominatingSet::new().solve(&graph);

        assert_eq!(set.members, vec![3]);
    }

    #[test]
    fn test_isolated_vertices_join_the_set() {
        // 3 and 4 have no neighbors; they are only chosen once counts are all zero
        let graph = Graph::from_edges(4, &[(1, 2)]);
        let set = GreedyDominatingSet::new().solve(&graph);

        assert_eq!(set.members, vec![1, 3, 4]);
        assert!(set.dominates(&graph));
    }

    #[test]
    fn test_path_of_three() {
        let graph = Graph::from_edges(3, &[(1, 2), (2, 3)]);
        let set = GreedyDominatingSet::new().solve(&graph);

        assert_eq!(set.members, vec![2]);
        assert_eq!(set.iterations, 3);
    }

    #[test]
    fn test_random_graphs_are_dominated() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let n = 25;
            let mut graph = Graph::with_vertices(n);
            for u in 1..=n {
                for v in u + 1..=n {
                    if rng.gen_bool(0.1) {
                        graph.add_edge(u, v);
                    }
                }
            }

            let set = GreedyDominatingSet::new().solve(&graph);
            assert!(set.dominates(&graph), "seed {seed}");
            assert!(set.iterations <= graph.num_vertices());
            assert!(set.members.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
