//! Create command implementation

use anyhow::{Context, Result};
use chrono::Local;
use dc_core::catalog::create_entry;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::commands::common::load_project;

/// Execute the create command
pub async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migration_dir = project.migration_dir();

    let dir = create_entry(&migration_dir, &args.name, Local::now().naive_local())
        .context("Failed to create migration")?;

    println!("Created migration {}", dir.display());
    Ok(())
}
