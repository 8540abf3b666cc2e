//! CLI argument definitions and command modules.

pub mod bundle;
pub mod chat;
pub mod query;

use clap::{Parser, Subcommand};

use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "geniechat",
    about = "Sample app for Databricks SQL and Genie conversational queries",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with a Genie space about your data
    Chat,

    /// Execute a SQL query and print the result table
    Query {
        /// SQL to run; defaults to the NYC taxi sample aggregation
        sql: Option<String>,
    },

    /// Assemble a deployable bundle from a built artifact
    Bundle {
        /// Built artifact to ship
        #[arg(long)]
        artifact: PathBuf,

        /// Companion entry-point script to include, skipped when missing
        #[arg(long)]
        entry: Option<PathBuf>,

        /// Output directory, removed and recreated on every run
        #[arg(long, default_value = ".build")]
        out: PathBuf,
    },
}
