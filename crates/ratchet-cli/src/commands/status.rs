//! Status command implementation

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{
    database_path, load_config, migrations_dir, open_target_db, print_table, ExitCode,
};
use ratchet_core::{discover_scripts, AppliedMigration, MigrationScript};
use ratchet_db::ledger::read_applied;

/// State of one migration relative to the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MigrationState {
    /// Recorded in the ledger with a matching checksum
    Applied,
    /// On disk but not yet recorded
    Pending,
    /// Recorded, but the on-disk file has been edited since
    Changed,
    /// Recorded, but no file with that version exists on disk
    Missing,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationState::Applied => write!(f, "applied"),
            MigrationState::Pending => write!(f, "pending"),
            MigrationState::Changed => write!(f, "changed"),
            MigrationState::Missing => write!(f, "missing"),
        }
    }
}

/// One row of the status report
#[derive(Debug, Serialize)]
pub(crate) struct StatusRow {
    version: u32,
    name: String,
    state: MigrationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_at: Option<String>,
}

/// Merge on-disk scripts with ledger records into report rows.
///
/// Unlike planning, this never fails: drift and orphans become rows so
/// the operator sees the full picture before deciding what to do.
pub(crate) fn status_rows(
    scripts: &[MigrationScript],
    applied: &[AppliedMigration],
) -> Vec<StatusRow> {
    let mut rows: Vec<StatusRow> = Vec::with_capacity(scripts.len());

    for script in scripts {
        let row = match applied.iter().find(|r| r.version == script.version) {
            Some(record) if record.checksum == script.checksum() => StatusRow {
                version: script.version,
                name: script.name.clone(),
                state: MigrationState::Applied,
                applied_at: Some(record.applied_at.clone()),
            },
            Some(record) => StatusRow {
                version: script.version,
                name: script.name.clone(),
                state: MigrationState::Changed,
                applied_at: Some(record.applied_at.clone()),
            },
            None => StatusRow {
                version: script.version,
                name: script.name.clone(),
                state: MigrationState::Pending,
                applied_at: None,
            },
        };
        rows.push(row);
    }

    for record in applied {
        if scripts.iter().all(|s| s.version != record.version) {
            rows.push(StatusRow {
                version: record.version,
                name: record.name.clone(),
                state: MigrationState::Missing,
                applied_at: Some(record.applied_at.clone()),
            });
        }
    }

    rows.sort_by_key(|r| r.version);
    rows
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dir = migrations_dir(global, config.as_ref());
    let db_path = database_path(global, config.as_ref())?;

    if global.verbose {
        eprintln!("[verbose] Migrations directory: {}", dir.display());
        eprintln!("[verbose] Database: {db_path}");
    }

    let scripts = discover_scripts(&dir)?;
    let db = open_target_db(&db_path)?;
    let applied = read_applied(db.conn())?;

    let rows = status_rows(&scripts, &applied);

    match args.output {
        StatusOutput::Table => print_status_table(&rows),
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    if args.check && rows.iter().any(|r| r.state != MigrationState::Applied) {
        return Err(ExitCode(1).into());
    }

    Ok(())
}

fn print_status_table(rows: &[StatusRow]) {
    if rows.is_empty() {
        println!("No migrations found");
        return;
    }

    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                format!("{:03}", row.version),
                row.name.clone(),
                row.state.to_string(),
                row.applied_at.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["VERSION", "NAME", "STATE", "APPLIED_AT"], &table_rows);

    let applied = rows
        .iter()
        .filter(|r| r.state == MigrationState::Applied)
        .count();
    let pending = rows
        .iter()
        .filter(|r| r.state == MigrationState::Pending)
        .count();
    println!();
    println!("{applied} applied, {pending} pending");

    let drifted = rows.len() - applied - pending;
    if drifted > 0 {
        println!("{drifted} migration(s) changed or missing; migrate will refuse to run");
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
