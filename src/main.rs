//! Greedy heuristics - Command Line Interface
//! 
//! One subcommand per heuristic, plus a batch benchmark over a directory.

use clap::{Parser, Subcommand};
use combopt_heuristics::benchmark::{Benchmark, BenchmarkConfig};
use combopt_heuristics::cli::{self, GraphArgs, TspArgs};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "combopt-heuristics")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Greedy heuristics for coloring, dominating set, max-cut and TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Welsh-Powell coloring of an edge-list graph
    Color(GraphArgs),

    /// Greedy dominating set of an edge-list graph
    Dominate(GraphArgs),

    /// Sahni-Gonzalez max-cut of an edge-list graph
    Maxcut(GraphArgs),

    /// Nearest-neighbor tour of a TSPLIB instance
    Tsp(TspArgs),

    /// Run every heuristic on a directory of instances
    Bench {
        /// Directory containing .col, .mc and .tsp files
        #[arg(short, long)]
        dir: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Round TSP distances
        #[arg(long)]
        round: bool,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Color(args) => cli::finish(cli::run_coloring(&args)),
        Commands::Dominate(args) => cli::finish(cli::run_dominating_set(&args)),
        Commands::Maxcut(args) => cli::finish(cli::run_max_cut(&args)),
        Commands::Tsp(args) => cli::finish(cli::run_tsp(&args)),
        Commands::Bench { dir, output, round, quiet } => {
            run_benchmark(&dir, &output, round, quiet);
        }
    }
}

fn run_benchmark(dir: &PathBuf, output: &PathBuf, round: bool, quiet: bool) {
    println!("Loading instances from {:?}...", dir);

    let config = BenchmarkConfig {
        rounding: round,
        progress: !quiet,
    };
    let mut benchmark = Benchmark::new(config);

    if let Err(e) = benchmark.run_dir(dir) {
        eprintln!("Error reading {:?}: {}", dir, e);
        std::process::exit(1);
    }

    if benchmark.records().is_empty() {
        eprintln!("No instances found!");
        return;
    }

    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    let results_path = output.join("results.csv");
    if let Err(e) = benchmark.export_to_csv(&results_path) {
        eprintln!("Failed to export results: {}", e);
        std::process::exit(1);
    }
    println!("\nResults exported to {:?}", results_path);

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    match std::fs::write(&report_path, &report) {
        Ok(()) => println!("Report saved to {:?}", report_path),
        Err(e) => eprintln!("Failed to save report: {}", e),
    }
}
