//! Redo command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::{
    build_types_if_configured, load_project, open_session, print_migrate_outcome,
    print_rollback_outcome,
};

/// Execute the redo command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let session = open_session(&project)?;

    let outcome = session.migrator().redo().await?;
    print_rollback_outcome(&outcome.rollback);
    print_migrate_outcome(&outcome.migrate);

    build_types_if_configured(&project, &session).await?;
    Ok(())
}
