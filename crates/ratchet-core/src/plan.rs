//! Plan computation: which scripts still need to run
//!
//! A plan is computed purely from the scripts on disk and the rows in
//! the ledger, before any DDL runs, so every invariant violation aborts
//! the run without touching the target database.

use crate::error::{CoreError, CoreResult};
use crate::script::MigrationScript;

/// One row of the bookkeeping ledger
#[derive(Debug, Clone)]
pub struct AppliedMigration {
    /// Script version recorded at apply time
    pub version: u32,

    /// Script name recorded at apply time
    pub name: String,

    /// Checksum of the script text at apply time
    pub checksum: String,

    /// Timestamp recorded by the database
    pub applied_at: String,
}

impl AppliedMigration {
    /// Display label in `NNN_name` form
    pub fn label(&self) -> String {
        format!("{:03}_{}", self.version, self.name)
    }
}

/// The validated, ordered set of scripts that still need to run
#[derive(Debug)]
pub struct MigrationPlan<'a> {
    /// Scripts with no ledger row, ascending by version
    pub pending: Vec<&'a MigrationScript>,

    /// Number of scripts already recorded in the ledger
    pub already_applied: usize,
}

impl MigrationPlan<'_> {
    /// True when the target database is fully migrated
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Compute the pending plan from the scripts on disk and the ledger rows
///
/// Enforces the ledger invariants:
/// - every applied version still has a script on disk
/// - no applied script has been edited since it ran
/// - no pending script is numbered below the newest applied version
pub fn plan<'a>(
    scripts: &'a [MigrationScript],
    applied: &[AppliedMigration],
) -> CoreResult<MigrationPlan<'a>> {
    for record in applied {
        let Some(script) = scripts.iter().find(|s| s.version == record.version) else {
            return Err(CoreError::RecordWithoutScript {
                version: record.version,
                name: record.name.clone(),
            });
        };

        if script.checksum() != record.checksum {
            return Err(CoreError::ScriptChanged {
                label: script.label(),
            });
        }
    }

    let mut pending: Vec<&MigrationScript> = scripts
        .iter()
        .filter(|s| applied.iter().all(|r| r.version != s.version))
        .collect();
    pending.sort_by_key(|s| s.version);

    if let Some(newest) = applied.iter().map(|r| r.version).max() {
        if let Some(stale) = pending.iter().find(|s| s.version < newest) {
            return Err(CoreError::OutOfOrderScript {
                label: stale.label(),
                newest,
            });
        }
    }

    Ok(MigrationPlan {
        pending,
        already_applied: applied.len(),
    })
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
