//! Error types for dc-types

use dc_db::DbError;
use thiserror::Error;

/// Type generation errors
#[derive(Error, Debug)]
pub enum TypesError {
    /// Schema introspection failed (T001)
    #[error("[T001] Failed to read schema: {0}")]
    Db(#[from] DbError),

    /// The output file could not be written (T002)
    #[error("[T002] Failed to write types to {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for TypesError
pub type TypesResult<T> = Result<T, TypesError>;
