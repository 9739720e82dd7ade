//! New command implementation - scaffolds the next migration script

use anyhow::{Context, Result};
use std::fs;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::{load_config, migrations_dir};
use ratchet_core::discover_scripts;

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid migration name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let config = load_config(global)?;
    let dir = migrations_dir(global, config.as_ref());

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // The next version is one past the highest on disk; gaps stay gaps.
    let scripts = discover_scripts(&dir)?;
    let next = scripts.last().map(|s| s.version + 1).unwrap_or(1);

    let path = dir.join(format!("{next:03}_{}.sql", args.name));
    let content = format!("-- {next:03}_{}: describe this change\n", args.name);
    fs::write(&path, &content).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
