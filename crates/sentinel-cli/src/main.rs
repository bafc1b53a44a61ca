//! sentinel - dependency trust assessment CLI

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sentinel_cli::run().await
}
