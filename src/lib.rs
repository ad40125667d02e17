//! Greedy Combinatorial Heuristics Library
//! 
//! Four independent construction heuristics over graphs and planar point sets.
//! 
//! # Features
//! 
//! - Welsh-Powell graph coloring
//! - Greedy minimum dominating set
//! - Sahni-Gonzalez sequential Max-Cut
//! - Nearest-neighbor TSP tours, from one start or from every start
//! - Edge-list (`p edge` / `e u v`) and TSPLIB coordinate loaders
//! - Batch benchmarking with CSV export
//! 
//! # Example
//! 
//! ```no_run
//! use combopt_heuristics::graph::Graph;
//! use combopt_heuristics::heuristics::{GraphHeuristic, WelshPowell};
//! use combopt_heuristics::instance::{DistanceMatrix, TspInstance};
//! use combopt_heuristics::heuristics::{NearestNeighborTsp, StartSelection};
//! 
//! let graph = Graph::from_file("le450_5a.col").unwrap();
//! let coloring = WelshPowell::new().solve(&graph);
//! println!("colors: {}", coloring.num_colors());
//! 
//! let instance = TspInstance::from_file("berlin52.tsp").unwrap();
//! let matrix = DistanceMatrix::build(&instance, true);
//! let outcome = NearestNeighborTsp::new().solve(&matrix, StartSelection::TryAll).unwrap();
//! println!("tour cost: {}", outcome.best.cost);
//! ```

pub mod error;
pub mod graph;
pub mod instance;
pub mod solution;
pub mod heuristics;
pub mod benchmark;
pub mod cli;

pub use error::{HeuristicError, Result};
pub use graph::Graph;
pub use instance::{DistanceMatrix, TspInstance};
