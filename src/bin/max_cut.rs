use clap::Parser;
use combopt_heuristics::cli::{self, GraphArgs};

#[derive(Parser)]
#[command(name = "max-cut")]
#[command(about = "Sahni-Gonzalez max-cut of an edge-list graph")]
struct Cli {
    #[command(flatten)]
    args: GraphArgs,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    cli::finish(cli::run_max_cut(&cli.args));
}
