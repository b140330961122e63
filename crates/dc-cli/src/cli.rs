//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// damaged-captain - apply and roll back directory-based SQL migrations
#[derive(Parser, Debug)]
#[command(name = "damaged-captain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: searched upwards from the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the configured database
    #[arg(short, long, global = true, env = "DAMAGED_CAPTAIN_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new empty migration
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Apply every pending migration
    #[command(visible_alias = "m")]
    Migrate,

    /// Roll back the most recent migration
    #[command(visible_alias = "ro")]
    Rollback,

    /// Roll back the most recent migration and apply it again
    #[command(visible_alias = "re")]
    Redo,

    /// Regenerate TypeScript types from the database schema
    #[command(visible_alias = "t")]
    Types,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration name, appended to the timestamp
    pub name: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
