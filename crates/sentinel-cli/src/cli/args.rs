//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Assess the trustworthiness of third-party packages
#[derive(Parser)]
#[command(name = "sentinel", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Comma-separated allow-list of trusted packages (replaces the default)
    #[arg(long, global = true, value_delimiter = ',')]
    pub trusted: Option<Vec<String>>,

    /// GitHub API token for authenticated reputation lookups
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Maximum packages assessed concurrently
    #[arg(long, global = true, default_value_t = 4)]
    pub concurrency: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess every dependency listed in a requirements file
    Check(CheckArgs),

    /// Assess a single package
    Package(PackageArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the requirements file (one dependency per line)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PackageArgs {
    /// Package name on the registry
    pub name: String,

    /// Version to scan (defaults to the registry's current version)
    #[arg(long = "package-version")]
    pub version: Option<String>,
}
