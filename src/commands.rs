//! CLI command definitions
//!
//! Defines the clap commands for the contract suite.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the contract suite against the mercado API
    Run(RunArgs),

    /// List the declared scenarios
    List,
}

/// Options for a suite run; each overrides the config file
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the API under test
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Seed for reproducible fixtures
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only run scenarios whose name contains this text (case-insensitive)
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}
