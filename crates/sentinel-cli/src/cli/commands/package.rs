//! `sentinel package` - single package assessment.

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::args::PackageArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: PackageArgs) -> Result<()> {
    let assessment = ctx
        .engine
        .assess(&args.name, args.version.as_deref())
        .await
        .with_context(|| format!("could not assess '{}'", args.name))?;

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
        OutputFormat::Pretty => output::print_assessment(&assessment),
    }

    Ok(())
}
