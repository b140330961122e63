//! Types command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::{build_types_if_configured, load_project, open_session};

/// Execute the types command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let session = open_session(&project)?;

    if !build_types_if_configured(&project, &session).await? {
        log::warn!("outputTypes is not set in config, no types generated");
    }
    Ok(())
}
