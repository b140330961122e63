//! Error types for dc-core

use thiserror::Error;

/// Core error type for damaged-captain
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: No target database configured
    #[error("[E004] Must set database in config")]
    DatabaseNotSet,

    /// E005: Failed to read the env file
    #[error("[E005] Failed to load env file {path}: {message}")]
    EnvFile { path: String, message: String },

    /// E006: Migration root directory not found
    #[error("[E006] Migration directory not found: {path}")]
    MigrationDirNotFound { path: String },

    /// E007: Migration directory name does not start with a valid timestamp
    #[error("[E007] Invalid migration directory name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// E008: up.sql or down.sql missing for an entry
    #[error("[E008] Migration script not found: {path}")]
    MissingScript { path: String },

    /// E009: Script references placeholders absent from the env map
    #[error("[E009] Unresolved placeholders in {path}: {}", names.join(", "))]
    UnresolvedPlaceholders { path: String, names: Vec<String> },

    /// E010: Version token is malformed
    #[error("[E010] Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// E011: Migration directory already exists
    #[error("[E011] Migration already exists: {path}")]
    MigrationExists { path: String },

    /// E012: IO error
    #[error("[E012] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E013: IO error with file path context
    #[error("[E013] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
