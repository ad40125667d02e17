//! Welsh-Powell greedy coloring.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::graph::Graph;
use crate::heuristics::GraphHeuristic;
use crate::solution::Coloring;

/// Welsh-Powell coloring
///
/// Vertices are ordered once by descending degree (ties keep ascending id).
/// Each pass opens a new color, gives it to the first uncolored vertex in that
/// order and then to every later uncolored vertex with no neighbor already
/// holding it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelshPowell;

impl WelshPowell {
    pub fn new() -> Self {
        WelshPowell
    }

    /// Descending degree; the stable sort keeps ascending ids among equals
    pub fn degree_order(graph: &Graph) -> Vec<usize> {
        let mut order: Vec<usize> = graph.vertices().collect();
        order.sort_by_key(|&v| Reverse(graph.degree(v)));
        order
    }
}

impl GraphHeuristic for WelshPowell {
    type Output = Coloring;

    fn solve(&self, graph: &Graph) -> Coloring {
        let order = Self::degree_order(graph);
        let mut color: BTreeMap<usize, Option<usize>> = graph.vertices().map(|v| (v, None)).collect();
        let mut current = 1;

        loop {
            let uncolored: Vec<usize> = order.iter().copied().filter(|v| color[v].is_none()).collect();
            let Some((&first, rest)) = uncolored.split_first() else {
                break;
            };

            color.insert(first, Some(current));
            let mut assigned = 1;

            for &v in rest {
                // reads the live state, so vertices colored earlier in this pass count
                let conflict = graph.neighbors(v).any(|u| color.get(&u) == Some(&Some(current)));
                if !conflict {
                    color.insert(v, Some(current));
                    assigned += 1;
                }
            }

            log::debug!("color {}: {} vertices", current, assigned);
            current += 1;
        }

        Coloring {
            colors: color
                .into_iter()
                .filter_map(|(v, c)| c.map(|c| (v, c)))
                .collect(),
        }
    }

    fn name(&self) -> &str {
        "WelshPowell"
    }
}
