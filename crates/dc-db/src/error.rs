//! Error types for dc-db

use thiserror::Error;

/// Database client errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Client executable could not be started (D001)
    #[error("[D001] Failed to start database client '{command}': {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// Client exited with a non-zero status (D002)
    #[error("[D002] SQL execution failed ({command} exited with {status}){}", stderr_suffix(.stderr))]
    ExecutionFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// IO error talking to the client process (D003)
    #[error("[D003] Client IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Version marker read back from the database is malformed (D004)
    #[error("[D004] Invalid version marker '{value}' in db_version: {reason}")]
    InvalidVersionMarker { value: String, reason: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl DbError {
    /// Captured stderr of a failed execution, empty for other variants.
    pub fn stderr(&self) -> &str {
        match self {
            DbError::ExecutionFailed { stderr, .. } => stderr,
            _ => "",
        }
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
