use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{HeuristicError, Result};
use crate::instance::{DistanceMatrix, TspInstance};
use crate::solution::{Tour, TspOutcome};

pub trait ConstructionHeuristic {
    /// Build a closed tour starting at dense index `start`
    fn construct(&self, matrix: &DistanceMatrix, start: usize) -> Tour;
    fn name(&self) -> &str;
}

/// Which vertices a nearest-neighbor run starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartSelection {
    /// The smallest vertex id
    #[default]
    Smallest,
    /// A given vertex id
    Vertex(usize),
    /// Every vertex; the cheapest tour wins, lowest start id on ties
    TryAll,
}

impl StartSelection {
    /// `--start` / `--try-all` flags; try-all wins when both are given
    pub fn from_flags(start: Option<usize>, try_all: bool) -> Self {
        match (try_all, start) {
            (true, _) => StartSelection::TryAll,
            (false, Some(id)) => StartSelection::Vertex(id),
            (false, None) => StartSelection::Smallest,
        }
    }
}

/// Configuration of a nearest-neighbor run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TspConfig {
    /// Round distances to `floor(d + 0.5)`
    pub rounding: bool,
    pub start: StartSelection,
}

/// Nearest Neighbor Heuristic
///
/// Builds a tour by repeatedly moving to the closest unvisited node. Nodes are
/// scanned in ascending id order and only a strictly shorter distance replaces
/// the current choice, so the lowest id wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborTsp;

impl NearestNeighborTsp {
    pub fn new() -> Self {
        NearestNeighborTsp
    }

    fn find_nearest(matrix: &DistanceMatrix, current: usize, visited: &[bool]) -> Option<usize> {
        // min_by_key keeps the first of equal minima
        matrix
            .row(current)
            .iter()
            .enumerate()
            .filter(|&(j, _)| !visited[j])
            .min_by_key(|&(_, &d)| OrderedFloat(d))
            .map(|(j, _)| j)
    }

    /// Tour from dense index `start`; see [`ConstructionHeuristic::construct`]
    pub fn tour_from(&self, matrix: &DistanceMatrix, start: usize) -> Tour {
        let n = matrix.len();
        let mut visited = vec![false; n];
        visited[start] = true;

        let mut order = Vec::with_capacity(n + 1);
        order.push(matrix.id_at(start));
        let mut current = start;
        let mut cost = 0.0;

        while let Some(next) = Self::find_nearest(matrix, current, &visited) {
            cost += matrix.distance(current, next);
            visited[next] = true;
            order.push(matrix.id_at(next));
            current = next;
        }

        cost += matrix.distance(current, start);
        order.push(matrix.id_at(start));

        Tour {
            order,
            cost,
            start: matrix.id_at(start),
        }
    }

    /// Build the distance matrix for `instance` and solve it under `config`
    ///
    /// The start vertex is checked against the instance before the matrix is built.
    pub fn solve_instance(&self, instance: &TspInstance, config: &TspConfig) -> Result<TspOutcome> {
        if instance.is_empty() {
            return Err(HeuristicError::EmptyInstance(instance.name.clone()));
        }
        if let StartSelection::Vertex(id) = config.start {
            if !instance.contains(id) {
                return Err(HeuristicError::UnknownStartVertex(id));
            }
        }

        let matrix = DistanceMatrix::build(instance, config.rounding);
        self.solve(&matrix, config.start)
    }

    /// Run the heuristic from the starts named by `selection` and keep the best tour
    pub fn solve(&self, matrix: &DistanceMatrix, selection: StartSelection) -> Result<TspOutcome> {
        let starts: Vec<usize> = match selection {
            StartSelection::TryAll => (0..matrix.len()).collect(),
            StartSelection::Smallest => {
                if matrix.is_empty() {
                    return Err(HeuristicError::EmptyInstance("distance matrix".to_string()));
                }
                vec![0]
            }
            StartSelection::Vertex(id) => {
                vec![matrix.index_of(id).ok_or(HeuristicError::UnknownStartVertex(id))?]
            }
        };
        if starts.is_empty() {
            return Err(HeuristicError::EmptyInstance("distance matrix".to_string()));
        }

        log::info!("nearest neighbor over {} nodes from {} start(s)", matrix.len(), starts.len());

        // starts are independent; collect keeps them in ascending order for the reduction
        let tours: Vec<Tour> = starts
            .par_iter()
            .map(|&s| self.construct(matrix, s))
            .collect();

        let start_costs: Vec<(usize, f64)> = tours.iter().map(|t| (t.start, t.cost)).collect();

        let mut tours = tours.into_iter();
        let mut best = tours.next().ok_or_else(|| HeuristicError::EmptyInstance("distance matrix".to_string()))?;
        for tour in tours {
            log::debug!("start {}: cost {}", tour.start, tour.cost);
            if tour.cost < best.cost {
                best = tour;
            }
        }

        Ok(TspOutcome { best, start_costs })
    }
}

impl ConstructionHeuristic for NearestNeighborTsp {
    fn construct(&self, matrix: &DistanceMatrix, start: usize) -> Tour {
        self.tour_from(matrix, start)
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
