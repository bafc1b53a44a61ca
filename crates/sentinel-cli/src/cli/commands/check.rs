//! `sentinel check` - batch assessment of a requirements file.

use anyhow::{bail, Context as _, Result};

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::{self, OutputFormat};
use crate::requirements;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let packages = requirements::parse(&content);
    if packages.is_empty() {
        bail!("no dependencies found in {}", args.file.display());
    }

    println!(
        "Assessing {} package(s) from {}...",
        packages.len(),
        args.file.display()
    );
    let outcomes = ctx.engine.assess_batch(packages).await;

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        OutputFormat::Pretty => output::print_batch(&outcomes),
    }

    Ok(())
}
