//! Batch runs over a directory of instances.
//!
//! `.col` files get coloring and dominating set, `.mc` files get max-cut and
//! `.tsp` files get nearest neighbor from every start. Results are exported
//! to CSV and summarised in a text report.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::Graph;
use crate::heuristics::{GraphHeuristic, GreedyDominatingSet, NearestNeighborTsp, SahniGonzalez, StartSelection, TspConfig, WelshPowell};
use crate::instance::TspInstance;
use crate::solution::{Coloring, Cut, DominatingSet};

/// One heuristic run on one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Instance name
    pub instance: String,
    /// Heuristic name
    pub heuristic: String,
    /// Number of vertices
    pub vertices: usize,
    /// Colors used, set size, cut size or tour cost
    pub objective: f64,
    /// Computation time in seconds
    pub time: f64,
    /// When the run finished (RFC 3339)
    pub timestamp: String,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Round TSP distances
    pub rounding: bool,
    /// Show a progress bar
    pub progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            rounding: false,
            progress: true,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    records: Vec<BenchmarkRecord>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            records: Vec::new(),
        }
    }

    /// Instance files in `dir` with a known extension, sorted by path
    pub fn instance_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    log::warn!("skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|path| matches!(extension(path).as_deref(), Some("col" | "mc" | "tsp")))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Run every applicable heuristic on every instance in `dir`
    pub fn run_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let files = Self::instance_files(dir)?;

        let bar = if self.config.progress {
            let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(files.len() as u64).with_style(style)
        } else {
            ProgressBar::hidden()
        };

        for path in &files {
            bar.set_message(path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
            if let Err(e) = self.run_file(path) {
                log::warn!("skipping {:?}: {}", path, e);
            }
            bar.inc(1);
        }

        bar.finish_with_message("done");
        Ok(())
    }

    /// Run the heuristics matching the file's extension
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        match extension(path).as_deref() {
            Some("col") => {
                let graph = Graph::from_file(path)?;
                self.run_graph(&graph, &WelshPowell::new(), |c: &Coloring| c.num_colors() as f64);
                self.run_graph(&graph, &GreedyDominatingSet::new(), |s: &DominatingSet| s.len() as f64);
            }
            Some("mc") => {
                let graph = Graph::from_file(path)?;
                self.run_graph(&graph, &SahniGonzalez::new(), |cut: &Cut| cut.size as f64);
            }
            Some("tsp") => {
                let instance = TspInstance::from_file(path)?;
                self.run_tsp(&instance)?;
            }
            _ => log::debug!("ignoring {:?}", path),
        }
        Ok(())
    }

    fn run_graph<H: GraphHeuristic>(&mut self, graph: &Graph, heuristic: &H, objective: impl Fn(&H::Output) -> f64) {
        log::info!("Running {} on instance: {}", heuristic.name(), graph.name);
        let start = Instant::now();
        let result = heuristic.solve(graph);
        let time = start.elapsed().as_secs_f64();

        self.record(&graph.name, heuristic.name(), graph.num_vertices(), objective(&result), time);
    }

    fn run_tsp(&mut self, instance: &TspInstance) -> Result<()> {
        log::info!("Running NearestNeighbor on instance: {}", instance.name);
        let start = Instant::now();
        let config = TspConfig {
            rounding: self.config.rounding,
            start: StartSelection::TryAll,
        };
        let outcome = NearestNeighborTsp::new().solve_instance(instance, &config)?;
        let time = start.elapsed().as_secs_f64();

        self.record(&instance.name, "NearestNeighbor", instance.dimension(), outcome.best.cost, time);
        Ok(())
    }

    fn record(&mut self, instance: &str, heuristic: &str, vertices: usize, objective: f64, time: f64) {
        self.records.push(BenchmarkRecord {
            instance: instance.to_string(),
            heuristic: heuristic.to_string(),
            vertices,
            objective,
            time,
            timestamp: chrono::Local::now().to_rfc3339(),
        });
    }

    /// Export records to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("       Heuristics Benchmark Report\n");
        report.push_str("========================================\n\n");

        report.push_str(&format!("{:<30} {:<20} {:>8} {:>14} {:>10}\n",
            "Instance", "Heuristic", "Vertices", "Objective", "Time"));
        report.push_str("-".repeat(86).as_str());
        report.push('\n');

        for r in &self.records {
            report.push_str(&format!("{:<30} {:<20} {:>8} {:>14.2} {:>10.4}\n",
                r.instance, r.heuristic, r.vertices, r.objective, r.time));
        }

        report.push_str("-".repeat(86).as_str());
        report.push('\n');

        let mut per_heuristic: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for r in &self.records {
            let entry = per_heuristic.entry(r.heuristic.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += r.time;
        }

        report.push_str("\nTotal time per heuristic:\n");
        for (heuristic, (runs, time)) in &per_heuristic {
            report.push_str(&format!("  {}: {} runs, {:.4}s\n", heuristic, runs, time));
        }

        report
    }

    /// Get all records
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
