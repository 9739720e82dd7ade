//! Target database connection wrapper.
//!
//! [`TargetDb`] owns a DuckDB [`Connection`] and provides helpers for
//! opening the target database and transacting against it. Migration
//! runs are sequential, so no `Mutex` is needed.

use crate::error::{is_lock_conflict, DbError, DbResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection to the target database.
pub struct TargetDb {
    conn: Connection,
}

impl TargetDb {
    /// Open (or create) the target database from a path string.
    ///
    /// `":memory:"` opens an in-memory database. A lock held by another
    /// process surfaces as [`DbError::ConcurrentMigration`] rather than
    /// a generic connection failure.
    pub fn open(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            return Self::open_memory();
        }
        let conn = Connection::open(Path::new(path)).map_err(|e| {
            let msg = e.to_string();
            if is_lock_conflict(&msg) {
                DbError::ConcurrentMigration(msg)
            } else {
                DbError::ConnectionFailed(format!("{msg}: {path}"))
            }
        })?;
        Ok(Self { conn })
    }

    /// Create an in-memory target database.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling
    /// back on error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionFailed(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionFailed(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

/// Probe for a table by name in the `main` schema.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables
         WHERE table_schema = 'main' AND table_name = ?",
        duckdb::params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Probe for a column on a table in the `main` schema.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.columns
         WHERE table_schema = 'main' AND table_name = ? AND column_name = ?",
        duckdb::params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Probe for an index by name.
pub fn index_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM duckdb_indexes() WHERE index_name = ?",
        duckdb::params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
