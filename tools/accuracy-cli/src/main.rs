//! # Accuracy CLI
//!
//! Scores expert weekly rankings and love/hate calls against Sleeper stats.

mod cli;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CliHandler};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise keep the console report readable
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let handler = CliHandler::new(cli.config.as_deref())?;
    handler.handle_command(cli.command).await
}
