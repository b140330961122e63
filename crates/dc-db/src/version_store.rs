//! Applied-version bookkeeping inside the target database.
//!
//! The marker lives in a single-column, single-row table. Writes replace
//! the row in place; reads treat a missing table as "nothing applied".

use crate::error::{DbError, DbResult};
use crate::traits::SqlClient;
use dc_core::Version;

/// Bookkeeping table name
pub const VERSION_TABLE: &str = "db_version";

/// Query reading the current marker
pub const SELECT_VERSION_SQL: &str = "select version from db_version;";

/// stderr fragments (lowercase) that identify a missing relation across
/// common clients (mysql, psql, sqlite3, sqlcmd). The message must also name
/// the bookkeeping table; a missing database or role is a real failure.
const MISSING_TABLE_PATTERNS: &[&str] = &[
    "doesn't exist",
    "does not exist",
    "no such table",
    "unknown table",
    "invalid object name",
];

/// Reads and writes the applied version marker
pub struct VersionStore<'a> {
    client: &'a dyn SqlClient,
}

impl<'a> VersionStore<'a> {
    /// Create a store on top of a client
    pub fn new(client: &'a dyn SqlClient) -> Self {
        Self { client }
    }

    /// Current applied version; the sentinel when no migration has run yet.
    ///
    /// Only a missing bookkeeping table maps to the sentinel. Every other
    /// client failure is returned to the caller.
    pub async fn current_version(&self) -> DbResult<Version> {
        match self.client.query(SELECT_VERSION_SQL).await {
            Ok(output) => parse_version_output(&output),
            Err(err) if is_missing_table(&err) => {
                log::debug!("{VERSION_TABLE} not found, treating database as unmigrated");
                Ok(Version::initial())
            }
            Err(err) => Err(err),
        }
    }

    /// Replace the marker with `version`.
    pub async fn record_version(&self, version: &Version) -> DbResult<()> {
        log::debug!("Recording version {version}");
        self.client.execute(&record_version_sql(version)).await
    }
}

/// Script that creates the table if needed and replaces its only row.
pub fn record_version_sql(version: &Version) -> String {
    format!(
        "create table if not exists {VERSION_TABLE} (version char(16));\n\
         delete from {VERSION_TABLE};\n\
         insert into {VERSION_TABLE} values('{}');\n",
        version.marker()
    )
}

/// Whether a failed lookup means the bookkeeping table does not exist.
pub fn is_missing_table(err: &DbError) -> bool {
    let stderr = err.stderr().to_ascii_lowercase();
    stderr.contains(VERSION_TABLE) && MISSING_TABLE_PATTERNS.iter().any(|p| stderr.contains(p))
}

/// Parse client output: a header line followed by the marker row.
pub fn parse_version_output(output: &str) -> DbResult<Version> {
    let Some(value) = output
        .lines()
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty())
    else {
        return Ok(Version::initial());
    };

    Version::parse(value).map_err(|e| DbError::InvalidVersionMarker {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
