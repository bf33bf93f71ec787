use anyhow::{Context, Result};
use clap::Parser;

use reply_coach::adapters::cli::{self, Cli};
use reply_coach::config::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging, args.verbose);

    cli::run(args, &config).await
}
