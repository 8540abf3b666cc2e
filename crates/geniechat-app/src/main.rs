//! Genie chat sample app entry point.
//!
//! Binary name: `geniechat`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! chat loop, the one-shot query command, or the bundle command.

mod cli;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat => cli::chat::run_chat().await,
        Commands::Query { sql } => cli::query::run_query(sql).await,
        Commands::Bundle {
            artifact,
            entry,
            out,
        } => cli::bundle::run_bundle(&artifact, entry.as_deref(), &out),
    }
}
