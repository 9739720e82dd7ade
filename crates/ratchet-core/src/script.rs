//! Migration script representation and directory discovery
//!
//! Scripts are plain SQL files named `NNN_name.sql`. The zero-padded
//! numeric prefix fixes the apply order; the remainder of the stem is a
//! human-readable name. Files that do not follow the convention are not
//! migrations and are skipped with a warning.

use crate::error::{CoreError, CoreResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A single migration script loaded from disk
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Numeric version from the filename prefix
    pub version: u32,

    /// Descriptive name (the file stem after the prefix)
    pub name: String,

    /// Path to the source .sql file
    pub path: PathBuf,

    /// Raw SQL content
    pub sql: String,
}

impl MigrationScript {
    /// Load a script from a `.sql` file path
    ///
    /// Returns `Ok(None)` when the filename does not follow the
    /// `NNN_name.sql` convention.
    pub fn from_file(path: PathBuf) -> CoreResult<Option<Self>> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

        let Some((version, name)) = parse_stem(stem) else {
            log::warn!("Skipping non-migration file: {}", path.display());
            return Ok(None);
        };

        let sql = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Some(Self {
            version,
            name,
            path,
            sql,
        }))
    }

    /// Display label in `NNN_name` form
    pub fn label(&self) -> String {
        format!("{:03}_{}", self.version, self.name)
    }

    /// SHA256 checksum of the script text, recorded in the ledger at
    /// apply time so later edits to an applied script are detectable
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.sql.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Split a file stem into `(version, name)`
///
/// Returns `None` unless the stem is `<digits>_<name>` with a non-empty
/// name and a prefix that fits in a u32.
pub fn parse_stem(stem: &str) -> Option<(u32, String)> {
    let (prefix, name) = stem.split_once('_')?;
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if name.is_empty() {
        return None;
    }
    let version = prefix.parse().ok()?;
    Some((version, name.to_string()))
}

/// Discover all migration scripts in a directory (non-recursive)
///
/// The result is sorted ascending by version. Two scripts sharing a
/// version is an error; so is a missing directory.
pub fn discover_scripts(dir: &Path) -> CoreResult<Vec<MigrationScript>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationsDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut scripts: Vec<MigrationScript> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() || !path.extension().is_some_and(|e| e == "sql") {
            continue;
        }

        let Some(script) = MigrationScript::from_file(path)? else {
            continue;
        };

        if let Some(existing) = scripts.iter().find(|s| s.version == script.version) {
            return Err(CoreError::DuplicateVersion {
                version: script.version,
                first: existing.label(),
                second: script.label(),
            });
        }

        scripts.push(script);
    }

    scripts.sort_by_key(|s| s.version);
    Ok(scripts)
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
