//! The bookkeeping ledger.
//!
//! One row per applied script in `ratchet_migrations`. Rows are inserted
//! in the same transaction as their script's DDL and never updated or
//! deleted afterwards.

use crate::connection::table_exists;
use crate::error::{DbError, DbResult};
use duckdb::Connection;
use ratchet_core::plan::AppliedMigration;
use ratchet_core::script::MigrationScript;

/// Name of the bookkeeping table.
pub const LEDGER_TABLE: &str = "ratchet_migrations";

/// Ensure the ledger table exists.
///
/// The `version` primary key backstops double-insert of the same script.
pub fn ensure_ledger(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ratchet_migrations (
             version    INTEGER PRIMARY KEY,
             name       TEXT NOT NULL,
             checksum   TEXT NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| DbError::LedgerFailed(format!("failed to create ledger table: {e}")))?;
    Ok(())
}

/// Read all applied rows, ascending by version.
///
/// A database the ledger has never been created in reads as empty, so
/// `status` can inspect a fresh target without writing to it.
pub fn read_applied(conn: &Connection) -> DbResult<Vec<AppliedMigration>> {
    if !table_exists(conn, LEDGER_TABLE)? {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare(
            "SELECT version, name, checksum, CAST(applied_at AS VARCHAR)
             FROM ratchet_migrations
             ORDER BY version",
        )
        .map_err(|e| DbError::LedgerFailed(format!("failed to read ledger: {e}")))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedMigration {
                version: row.get(0)?,
                name: row.get(1)?,
                checksum: row.get(2)?,
                applied_at: row.get(3)?,
            })
        })
        .map_err(|e| DbError::LedgerFailed(format!("failed to read ledger: {e}")))?;

    let mut applied = Vec::new();
    for row in rows {
        applied
            .push(row.map_err(|e| DbError::LedgerFailed(format!("failed to read ledger row: {e}")))?);
    }
    Ok(applied)
}

/// Record one applied script.
///
/// Must run inside the same transaction as the script's DDL so the row
/// and the schema change commit or roll back together.
pub fn record_applied(conn: &Connection, script: &MigrationScript) -> DbResult<()> {
    conn.execute(
        "INSERT INTO ratchet_migrations (version, name, checksum) VALUES (?, ?, ?)",
        duckdb::params![script.version, script.name, script.checksum()],
    )
    .map_err(|e| {
        DbError::LedgerFailed(format!("failed to record migration {}: {e}", script.label()))
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
