//! Error types for ratchet-core

use thiserror::Error;

/// Core error type for Ratchet
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migrations directory not found
    #[error("[C001] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C002: Two scripts share a version prefix
    #[error("[C002] Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: u32,
        first: String,
        second: String,
    },

    /// C003: Ledger row with no matching script on disk
    #[error("[C003] Ledger records migration {version} ('{name}') but no script with that version exists on disk")]
    RecordWithoutScript { version: u32, name: String },

    /// C004: Applied script edited after the fact
    #[error("[C004] Script '{label}' has changed since it was applied; applied scripts are immutable")]
    ScriptChanged { label: String },

    /// C005: Pending script numbered below an already-applied one
    #[error("[C005] Script '{label}' is out of order: migration {newest} has already been applied")]
    OutOfOrderScript { label: String, newest: u32 },

    /// C006: Configuration file not found
    #[error("[C006] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C007: Invalid configuration value
    #[error("[C007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C008: IO error
    #[error("[C008] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C009: IO error with file path context
    #[error("[C009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C010: YAML parse error
    #[error("[C010] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
