//! Argument sets, output formatting and runners shared by every binary.
//!
//! Stdout carries only the result in the documented format; diagnostics go
//! through `log` (stderr) and a failed run exits with status 1.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use serde::Serialize;

use crate::error::Result;
use crate::graph::Graph;
use crate::heuristics::{GraphHeuristic, GreedyDominatingSet, NearestNeighborTsp, SahniGonzalez, StartSelection, TspConfig, WelshPowell};
use crate::instance::TspInstance;
use crate::solution::{Coloring, Cut, DominatingSet, TspOutcome};

/// Arguments of the edge-list heuristics
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Edge-list instance (`c` / `p edge N M` / `e u v` lines)
    pub file: PathBuf,

    /// Directory searched for bare file names not found in the working directory
    #[arg(long, env = "HEURISTICS_DATA_DIR", default_value = "labs")]
    pub data_dir: PathBuf,

    /// Also write the result as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of the nearest-neighbor TSP heuristic
#[derive(Args, Debug, Clone)]
pub struct TspArgs {
    /// TSPLIB instance with a NODE_COORD_SECTION
    pub file: PathBuf,

    /// Start vertex (defaults to the smallest id)
    #[arg(long)]
    pub start: Option<usize>,

    /// Try every vertex as start and keep the cheapest tour
    #[arg(long)]
    pub try_all: bool,

    /// Round distances TSPLIB-style, floor(d + 0.5)
    #[arg(long)]
    pub round: bool,

    /// Print the spread of tour costs over the tried starts
    #[arg(long)]
    pub stats: bool,

    /// Directory searched for bare file names not found in the working directory
    #[arg(long, env = "HEURISTICS_DATA_DIR", default_value = "labs")]
    pub data_dir: PathBuf,

    /// Also write the result as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TspArgs {
    pub fn config(&self) -> TspConfig {
        TspConfig {
            rounding: self.round,
            start: StartSelection::from_flags(self.start, self.try_all),
        }
    }
}

/// Use `path` as given unless it is a bare, missing file name that exists in `data_dir`
pub fn resolve_input(path: &Path, data_dir: &Path) -> PathBuf {
    let is_bare = path.components().count() == 1;
    if is_bare && !path.exists() {
        let candidate = data_dir.join(path);
        if candidate.exists() {
            log::debug!("using {:?} for {:?}", candidate, path);
            return candidate;
        }
    }
    path.to_path_buf()
}

pub fn format_coloring(coloring: &Coloring) -> String {
    let mut out = format!("Número de cores usadas: {}\n", coloring.num_colors());
    out.push_str("Coloração (vértice: cor):\n");
    for (v, c) in &coloring.colors {
        out.push_str(&format!("{}: {}\n", v, c));
    }
    out
}

pub fn format_dominating_set(set: &DominatingSet) -> String {
    let mut fields = vec![set.len().to_string(), "(".to_string()];
    fields.extend(set.members.iter().map(|v| v.to_string()));
    fields.push(")".to_string());
    format!("{}\n", fields.join(" "))
}

pub fn format_cut(cut: &Cut) -> String {
    let a: Vec<usize> = cut.a.iter().copied().collect();
    let b: Vec<usize> = cut.b.iter().copied().collect();
    format!(
        "Tamanho do corte: {}\nConjunto A ({} vértices): {:?}\nConjunto B ({} vértices): {:?}\n",
        cut.size,
        a.len(),
        a,
        b.len(),
        b
    )
}

pub fn format_tour(outcome: &TspOutcome) -> String {
    format!(
        "Custo total: {:?}\nTour (ordem de visita):\n{}\n",
        outcome.best.cost, outcome.best
    )
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    log::info!("result saved to {:?}", path);
    Ok(())
}

fn load_graph(args: &GraphArgs) -> Result<Graph> {
    let path = resolve_input(&args.file, &args.data_dir);
    log::info!("loading graph from {:?}", path);
    Graph::from_file(&path)
}

fn solve_graph<H>(args: &GraphArgs, heuristic: H, format: fn(&H::Output) -> String) -> Result<String>
where
    H: GraphHeuristic,
    H::Output: Serialize,
{
    let graph = load_graph(args)?;
    let start = Instant::now();
    let result = heuristic.solve(&graph);
    log::info!(
        "{} on {} ({} vertices) took {:.4}s",
        heuristic.name(),
        graph.name,
        graph.num_vertices(),
        start.elapsed().as_secs_f64()
    );

    if let Some(out) = &args.output {
        write_json(&result, out)?;
    }
    Ok(format(&result))
}

pub fn run_coloring(args: &GraphArgs) -> Result<String> {
    solve_graph(args, WelshPowell::new(), format_coloring)
}

pub fn run_dominating_set(args: &GraphArgs) -> Result<String> {
    solve_graph(args, GreedyDominatingSet::new(), format_dominating_set)
}

pub fn run_max_cut(args: &GraphArgs) -> Result<String> {
    solve_graph(args, SahniGonzalez::new(), format_cut)
}

pub fn run_tsp(args: &TspArgs) -> Result<String> {
    let path = resolve_input(&args.file, &args.data_dir);
    log::info!("loading coordinates from {:?}", path);
    let instance = TspInstance::from_file(&path)?;

    let start = Instant::now();
    let outcome = NearestNeighborTsp::new().solve_instance(&instance, &args.config())?;
    log::info!(
        "nearest neighbor on {} ({} nodes) took {:.4}s",
        instance.name,
        instance.dimension(),
        start.elapsed().as_secs_f64()
    );

    if let Some(out) = &args.output {
        write_json(&outcome, out)?;
    }

    let mut text = format_tour(&outcome);
    if args.stats {
        text.push_str(&format!("{}\n", outcome.statistics()));
    }
    Ok(text)
}

/// Print a runner's output, or report the error and exit with status 1
pub fn finish(result: Result<String>) {
    match result {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
