use clap::Parser;
use combopt_heuristics::cli::{self, GraphArgs};

#[derive(Parser)]
#[command(name = "dominating-set")]
#[command(about = "Greedy dominating set of an edge-list graph")]
struct Cli {
    #[command(flatten)]
    args: GraphArgs,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    cli::finish(cli::run_dominating_set(&cli.args));
}
