use clap::Parser;
use combopt_heuristics::cli::{self, GraphArgs};

#[derive(Parser)]
#[command(name = "welsh-powell")]
#[command(about = "Welsh-Powell greedy coloring of an edge-list graph")]
struct Cli {
    #[command(flatten)]
    args: GraphArgs,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    cli::finish(cli::run_coloring(&cli.args));
}
