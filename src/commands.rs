//! CLI command definitions
//!
//! Defines the clap commands for the tester CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full API scenario against a server (default)
    Run(RunArgs),

    /// Check a saved disaster list (JSON file) without touching the network
    Validate {
        /// Path to a JSON file holding a list of disaster records
        path: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Server root; requests go to <BASE_URL>/api/...
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON instead of the step trace
    #[arg(long)]
    pub json: bool,
}
