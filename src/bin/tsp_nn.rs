use clap::Parser;
use combopt_heuristics::cli::{self, TspArgs};

#[derive(Parser)]
#[command(name = "tsp-nn")]
#[command(about = "Nearest-neighbor tour of a TSPLIB instance")]
struct Cli {
    #[command(flatten)]
    args: TspArgs,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    cli::finish(cli::run_tsp(&cli.args));
}
