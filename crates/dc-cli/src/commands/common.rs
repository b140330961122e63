//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dc_core::Project;
use dc_migrate::{MigrateOutcome, RollbackOutcome, Session};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the project from `--config` or by searching upwards from the
/// working directory, then apply `--database`.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let mut project = match &global.config {
        Some(path) => Project::load(Path::new(path)),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Project::discover(&cwd)
        }
    }
    .context("Failed to load config")?;

    if let Some(database) = &global.database {
        project.config.database = database.clone();
    }
    Ok(project)
}

/// Open a database session for `project`
pub(crate) fn open_session(project: &Project) -> Result<Session> {
    Ok(Session::open(project)?)
}

/// Regenerate types when `outputTypes` is configured.
///
/// Returns whether anything was written.
pub(crate) async fn build_types_if_configured(
    project: &Project,
    session: &Session,
) -> Result<bool> {
    let Some(output) = project.output_types_path() else {
        return Ok(false);
    };

    let count = dc_types::build_types(
        session.client(),
        &output,
        project.config.output_interface_prefix.as_deref(),
    )
    .await
    .with_context(|| format!("Failed to generate types into {}", output.display()))?;

    println!("Generated {} types in {}", count, output.display());
    Ok(true)
}

pub(crate) fn print_migrate_outcome(outcome: &MigrateOutcome) {
    match outcome {
        MigrateOutcome::UpToDate { current } => {
            println!("Database is up to date at version {current}");
        }
        MigrateOutcome::Applied { from, applied } => {
            let last = applied.last().unwrap_or(from);
            println!(
                "Applied {} migration(s): {} -> {}",
                applied.len(),
                from,
                last
            );
        }
    }
}

pub(crate) fn print_rollback_outcome(outcome: &RollbackOutcome) {
    match outcome {
        RollbackOutcome::NothingToRollback { current } => {
            println!("Nothing to roll back at version {current}");
        }
        RollbackOutcome::RolledBack { name, from, to } => {
            println!("Rolled back {name}: {from} -> {to}");
        }
    }
}
