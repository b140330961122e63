//! damaged-captain CLI - directory-based SQL migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{create, migrate, redo, rollback, types};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Create(args) => create::execute(args, &cli.global).await,
        cli::Commands::Migrate => migrate::execute(&cli.global).await,
        cli::Commands::Rollback => rollback::execute(&cli.global).await,
        cli::Commands::Redo => redo::execute(&cli.global).await,
        cli::Commands::Types => types::execute(&cli.global).await,
    }
}

/// `info` by default, `debug` with `--verbose`; `RUST_LOG` takes precedence
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
