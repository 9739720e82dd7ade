//! Error types for ratchet-db

use ratchet_core::CoreError;
use thiserror::Error;

/// Database and migration errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: Failed to open the target database
    #[error("[D001] Database connection failed: {0}")]
    ConnectionFailed(String),

    /// D002: Another process holds the target database
    #[error("[D002] Database is locked by another migration run: {0}")]
    ConcurrentMigration(String),

    /// D003: A script's SQL failed; its transaction was rolled back
    #[error("[D003] Script '{script}' failed and was rolled back: {message}")]
    StatementFailed { script: String, message: String },

    /// D004: Transaction management failed
    #[error("[D004] Transaction failed: {0}")]
    TransactionFailed(String),

    /// D005: Ledger table could not be created, read, or written
    #[error("[D005] Ledger error: {0}")]
    LedgerFailed(String),

    /// D006: SQL execution failed outside a script transaction
    #[error("[D006] SQL execution failed: {0}")]
    ExecutionFailed(String),

    /// Invariant violation detected while planning
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // Classify DuckDB errors by inspecting the error message.
        // duckdb::Error does not expose structured variants, so string
        // matching is the only reliable approach. We use narrow patterns
        // to avoid misclassifying ordinary SQL errors.
        let msg = err.to_string();
        if is_lock_conflict(&msg) {
            DbError::ConcurrentMigration(msg)
        } else {
            DbError::ExecutionFailed(msg)
        }
    }
}

/// DuckDB reports a held writer lock (cross-process) or a write-write
/// transaction conflict (same process) with these phrases.
pub(crate) fn is_lock_conflict(msg: &str) -> bool {
    msg.contains("Could not set lock")
        || msg.contains("Conflicting lock")
        || msg.contains("write-write conflict")
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
