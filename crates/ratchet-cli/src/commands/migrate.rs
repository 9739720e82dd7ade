//! Migrate command implementation

use anyhow::Result;
use std::time::Instant;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{
    database_path, load_config, migrations_dir, open_target_db, ExitCode,
};
use ratchet_core::{discover_scripts, plan};
use ratchet_db::apply_script;
use ratchet_db::ledger::{ensure_ledger, read_applied};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dir = migrations_dir(global, config.as_ref());
    let db_path = database_path(global, config.as_ref())?;

    if global.verbose {
        eprintln!("[verbose] Migrations directory: {}", dir.display());
        eprintln!("[verbose] Database: {db_path}");
    }

    let scripts = discover_scripts(&dir)?;
    let db = open_target_db(&db_path)?;

    if args.dry_run {
        let applied = read_applied(db.conn())?;
        let plan = plan(&scripts, &applied)?;
        if plan.is_up_to_date() {
            println!(
                "Database is up to date ({} migration(s) applied)",
                plan.already_applied
            );
        } else {
            println!("Would apply {} migration(s):", plan.pending.len());
            for script in &plan.pending {
                println!("  {}", script.label());
            }
        }
        return Ok(());
    }

    ensure_ledger(db.conn())?;
    let applied = read_applied(db.conn())?;
    let plan = plan(&scripts, &applied)?;

    if plan.is_up_to_date() {
        println!(
            "Database is up to date ({} migration(s) applied)",
            plan.already_applied
        );
        return Ok(());
    }

    println!("Applying {} migration(s)...\n", plan.pending.len());
    let start = Instant::now();
    let mut applied_count = 0usize;

    for script in &plan.pending {
        let script_start = Instant::now();
        match apply_script(&db, script) {
            Ok(()) => {
                applied_count += 1;
                println!(
                    "  ✓ {} [{}ms]",
                    script.label(),
                    script_start.elapsed().as_millis()
                );
            }
            Err(e) => {
                println!(
                    "  ✗ {} - {} [{}ms]",
                    script.label(),
                    e,
                    script_start.elapsed().as_millis()
                );
                println!(
                    "\nApplied {} of {} migration(s), halted on first failure",
                    applied_count,
                    plan.pending.len()
                );
                return Err(ExitCode(1).into());
            }
        }
    }

    println!();
    println!(
        "Applied {} migration(s) in {}ms",
        applied_count,
        start.elapsed().as_millis()
    );
    Ok(())
}
