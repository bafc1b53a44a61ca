//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::output::OutputFormat;
use sentinel::{AssessmentEngine, GithubClient, TrustPolicy};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let policy = cli
        .trusted
        .clone()
        .map_or_else(TrustPolicy::default, TrustPolicy::with_trusted);

    let mut github = GithubClient::builder();
    if let Some(token) = &cli.github_token {
        github = github.token(token.clone());
    }

    let engine = AssessmentEngine::builder()
        .github(github.build())
        .policy(policy)
        .batch_concurrency(cli.concurrency)
        .build();

    let ctx = commands::Context {
        engine,
        output_format: cli.format.unwrap_or(OutputFormat::Pretty),
    };

    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Package(args) => commands::package::execute(ctx, args).await,
    }
}
