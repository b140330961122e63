//! Error types for dc-migrate

use dc_core::CoreError;
use dc_db::DbError;
use thiserror::Error;

/// Migration engine errors. All of them end the current operation.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Missing or invalid setup; nothing was executed (M001)
    #[error("[M001] Configuration error: {0}")]
    Configuration(CoreError),

    /// The migration catalog could not be read (M002)
    #[error("[M002] Failed to read migrations: {0}")]
    Catalog(CoreError),

    /// The current version could not be determined (M003)
    #[error("[M003] Failed to read current database version: {0}")]
    VersionLookup(DbError),

    /// A script could not be loaded or rendered (M004)
    #[error("[M004] Failed to load script: {0}")]
    Script(CoreError),

    /// An up-script failed; its compensating rollback succeeded (M005)
    #[error("[M005] Failed to run migration {script}: {source}")]
    MigrationFailed { script: String, source: DbError },

    /// An up-script failed and so did its compensating rollback (M006)
    #[error("[M006] Failed to migrate {script} then failed to roll back the partial migration: {source}; rollback: {rollback}")]
    MigrationAndRollbackFailed {
        script: String,
        source: DbError,
        rollback: Box<MigrateError>,
    },

    /// A down-script failed during an explicit rollback (M007)
    #[error("[M007] Failed to rollback migration {script}: {source}")]
    RollbackFailed { script: String, source: DbError },

    /// A script succeeded but the version marker could not be written (M008)
    #[error("[M008] Failed to record version {version} after {script}; the recorded version is now stale: {source}")]
    RecordFailed {
        script: String,
        version: String,
        source: DbError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
