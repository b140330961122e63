//! dc-types - Type generation for damaged-captain
//!
//! Reads the table list and column types from the target database and
//! writes one TypeScript class per table.

pub mod error;
pub mod generator;
pub mod introspect;

pub use error::{TypesError, TypesResult};
pub use generator::{render, to_pascal_case, ts_type, Column, Table};
pub use introspect::{describe_table, list_tables};

use dc_db::SqlClient;
use std::fs;
use std::path::Path;

/// Introspect every user table and write the generated classes to `output`.
///
/// Returns the number of classes written.
pub async fn build_types(
    client: &dyn SqlClient,
    output: &Path,
    prefix: Option<&str>,
) -> TypesResult<usize> {
    let mut tables = Vec::new();
    for name in list_tables(client).await? {
        let columns = describe_table(client, &name).await?;
        tables.push(Table { name, columns });
    }

    let rendered = render(&tables, prefix.unwrap_or_default());

    let io_err = |e: std::io::Error| TypesError::Io {
        path: output.display().to_string(),
        source: e,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(output, rendered).map_err(io_err)?;

    log::info!("Wrote {} types to {}", tables.len(), output.display());
    Ok(tables.len())
}
