//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use ratchet_core::{Config, CoreError};
use ratchet_db::TargetDb;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error. The command has already printed its own
        // diagnostics by the time this reaches main.rs.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project config if one exists.
///
/// `--config` names an explicit file and it is an error for that file to
/// be missing. Without the flag, `ratchet.yml` in the current directory
/// is used when present and its absence is not an error.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Option<Config>> {
    if let Some(path) = &global.config {
        let config = Config::load(Path::new(path)).context("Failed to load config")?;
        return Ok(Some(config));
    }
    match Config::load_from_dir(Path::new(".")) {
        Ok(config) => Ok(Some(config)),
        Err(CoreError::ConfigNotFound { .. }) => {
            log::debug!("No ratchet.yml found, using defaults");
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to load config"),
    }
}

/// Resolve the migrations directory from CLI flags and config.
///
/// Precedence: `--dir`, then the config's `migrations_dir`, then the
/// `migrations` default. Relative paths resolve against the current
/// directory.
pub(crate) fn migrations_dir(global: &GlobalArgs, config: Option<&Config>) -> PathBuf {
    if let Some(dir) = &global.dir {
        return PathBuf::from(dir);
    }
    match config {
        Some(config) => config.migrations_dir_absolute(Path::new(".")),
        None => PathBuf::from("migrations"),
    }
}

/// Strip an optional duckdb:// or duckdb: scheme from a database URL.
pub(crate) fn normalize_database_url(url: &str) -> &str {
    url.strip_prefix("duckdb://")
        .or_else(|| url.strip_prefix("duckdb:"))
        .unwrap_or(url)
}

/// Resolve the database path from CLI flags, environment, and config.
///
/// Precedence: `--database-url` (RATCHET_DATABASE_URL is folded in by
/// clap), then the config's target or base database. There is no
/// implicit fallback: migrating an unintended database is worse than
/// asking the user to name one.
pub(crate) fn database_path(global: &GlobalArgs, config: Option<&Config>) -> Result<String> {
    if let Some(url) = &global.database_url {
        return Ok(normalize_database_url(url).to_string());
    }

    let target = Config::resolve_target(global.target.as_deref());
    match config {
        Some(config) => {
            if let Some(db) = config
                .get_database_config(target.as_deref())
                .context("Failed to get database configuration")?
            {
                return Ok(db.path);
            }
        }
        None => {
            if let Some(t) = target {
                anyhow::bail!("Target '{t}' requires a ratchet.yml with named targets");
            }
        }
    }
    anyhow::bail!("No database specified: pass --database-url or set database.path in ratchet.yml")
}

/// Open the target database named by `path`.
pub(crate) fn open_target_db(path: &str) -> Result<TargetDb> {
    TargetDb::open(path).context("Failed to connect to database")
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
///
/// For each column, returns the maximum width across the header and all
/// row values so that data aligns when printed with left-padding.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout: a left-aligned header row, a
/// separator line of dashes, and each data row, with columns joined by
/// two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
