//! Sequential greedy Max-Cut (Sahni-Gonzalez).

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::heuristics::GraphHeuristic;
use crate::solution::Cut;

/// Sahni-Gonzalez max-cut
///
/// Vertices are placed once, in ascending id order, on the side opposite to
/// most of their already placed neighbors. Ties go to `A` unless `A` is
/// strictly larger than `B`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SahniGonzalez;

impl SahniGonzalez {
    pub fn new() -> Self {
        SahniGonzalez
    }
}

impl GraphHeuristic for SahniGonzalez {
    type Output = Cut;

    fn solve(&self, graph: &Graph) -> Cut {
        let mut a = BTreeSet::new();
        let mut b = BTreeSet::new();

        for v in graph.vertices() {
            let gain_a = graph.neighbors(v).filter(|u| b.contains(u)).count();
            let gain_b = graph.neighbors(v).filter(|u| a.contains(u)).count();

            let to_a = match gain_a.cmp(&gain_b) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => a.len() <= b.len(),
            };

            if to_a {
                a.insert(v);
            } else {
                b.insert(v);
            }
        }

        let mut cut = Cut { a, b, size: 0 };
        cut.size = cut.crossing_edges(graph);
        log::debug!("cut of {} edges, |A| = {}, |B| = {}", cut.size, cut.a.len(), cut.b.len());
        cut
    }

    fn name(&self) -> &str {
        "SahniGonzalez"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_four_cycle() {
        let graph = Graph::from_edges(4, &[(1, 2), (2, 3), (3, 4), (4, 1)]);
        let cut = SahniGonzalez::new().solve(&graph);

        assert_eq!(cut.a, set(&[1, 3]));
        assert_eq!(cut.b, set(&[2, 4]));
        assert_eq!(cut.size, 4);
    }

    #[test]
    fn test_ties_balance_the_sides() {
        let graph = Graph::with_vertices(5);
        let cut = SahniGonzalez::new().solve(&graph);

        // 0-0 tie each time: A, B, A, B, A
        assert_eq!(cut.a, set(&[1, 3, 5]));
        assert_eq!(cut.b, set(&[2, 4]));
        assert_eq!(cut.size, 0);
    }

    #[test]
    fn test_triangle() {
        let graph = Graph::from_edges(3, &[(1, 2), (2, 3), (1, 3)]);
        let cut = SahniGonzalez::new().solve(&graph);

        // 3 sees one neighbor on each side and |A| == |B|
        assert_eq!(cut.a, set(&[1, 3]));
        assert_eq!(cut.b, set(&[2]));
        assert_eq!(cut.size, 2);
    }

    #[test]
    fn test_duplicate_edges_counted_once() {
        let graph = Graph::from_edges(2, &[(1, 2), (2, 1), (1, 2)]);
        assert_eq!(SahniGonzalez::new().solve(&graph).size, 1);
    }

    #[test]
    fn test_random_graphs_partition() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let n = 30;
            let mut graph = Graph::with_vertices(n);
            for u in 1..=n {
                for v in u + 1..=n {
                    if rng.gen_bool(0.3) {
                        graph.add_edge(u, v);
                    }
                }
            }

            let cut = SahniGonzalez::new().solve(&graph);
            assert!(cut.is_partition(&graph), "seed {seed}");
            // each placement keeps at least half of the edges to placed neighbors
            assert!(2 * cut.size >= graph.distinct_edges().len(), "seed {seed}");
            assert_eq!(cut, SahniGonzalez::new().solve(&graph));
        }
    }
}
