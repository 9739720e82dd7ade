//! Migration applier: run pending scripts in order, atomically.

use crate::connection::TargetDb;
use crate::error::{is_lock_conflict, DbError, DbResult};
use crate::ledger::{ensure_ledger, read_applied, record_applied};
use ratchet_core::plan::{plan, MigrationPlan};
use ratchet_core::script::MigrationScript;

/// Outcome of a migration run
#[derive(Debug)]
pub struct ApplyOutcome {
    /// Labels of scripts applied by this run, in apply order
    pub applied: Vec<String>,

    /// Scripts already recorded in the ledger before this run
    pub already_applied: usize,
}

/// Apply a single script inside its own transaction.
///
/// The script's statements and its ledger row commit together; on any
/// failure the transaction rolls back and the error names the script.
pub fn apply_script(db: &TargetDb, script: &MigrationScript) -> DbResult<()> {
    log::debug!("Applying migration {}", script.label());

    db.transaction(|conn| {
        conn.execute_batch(&script.sql).map_err(|e| {
            let msg = e.to_string();
            if is_lock_conflict(&msg) {
                DbError::ConcurrentMigration(msg)
            } else {
                DbError::StatementFailed {
                    script: script.label(),
                    message: msg,
                }
            }
        })?;
        record_applied(conn, script)
    })
}

/// Apply every pending script in `plan`, in ascending version order.
///
/// Halts on the first failure; later scripts are not attempted and
/// earlier ones stay committed.
pub fn apply_plan(db: &TargetDb, plan: &MigrationPlan<'_>) -> DbResult<ApplyOutcome> {
    let mut outcome = ApplyOutcome {
        applied: Vec::new(),
        already_applied: plan.already_applied,
    };

    for script in &plan.pending {
        apply_script(db, script)?;
        outcome.applied.push(script.label());
    }

    Ok(outcome)
}

/// Full migration run against a target database.
///
/// Ensures the ledger exists, reads the applied set, computes the plan
/// (all invariant violations abort here, before any DDL), then applies
/// the pending scripts in ascending order.
pub fn apply(db: &TargetDb, scripts: &[MigrationScript]) -> DbResult<ApplyOutcome> {
    ensure_ledger(db.conn())?;
    let applied = read_applied(db.conn())?;
    let plan = plan(scripts, &applied)?;
    apply_plan(db, &plan)
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
