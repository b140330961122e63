//! SQL client trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Runs complete SQL scripts against the target database.
///
/// Each call is one client invocation: the script is delivered in full and
/// the call resolves once the client has exited. Implementations must be
/// Send + Sync for async operation.
#[async_trait]
pub trait SqlClient: Send + Sync {
    /// Run a script, letting the client write its output to our stdout
    async fn execute(&self, sql: &str) -> DbResult<()>;

    /// Run a script and return everything the client wrote to stdout
    async fn query(&self, sql: &str) -> DbResult<String>;

    /// Client identifier for logging
    fn describe(&self) -> String;
}
