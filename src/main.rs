//! Mercado contract suite CLI
//!
//! Runs the declared scenarios against the live mercado API and reports
//! the outcome of each one.

use clap::Parser;
use mercado::commands::Commands;
use mercado::{cli, common::logging};

#[derive(Parser)]
#[command(name = "mercado-contract", about = "Contract tests for the mercado API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Run(args) if args.verbose);
    logging::init_cli(verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
