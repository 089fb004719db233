//! CrisisMap API tester
//!
//! Runs one linear pass of checks against a CrisisMap API deployment and
//! exits 0 only if every executed test passed.

use clap::Parser;
use commands::{Commands, RunArgs};
use crisismap_tester::{cli, commands, common::logging};

#[derive(Parser)]
#[command(name = "crisismap-tester", about = "Integration tests for the CrisisMap API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default()));

    match cli::dispatch(command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
