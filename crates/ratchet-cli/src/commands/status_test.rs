use super::*;
use std::path::PathBuf;

fn script(version: u32, name: &str, sql: &str) -> MigrationScript {
    MigrationScript {
        version,
        name: name.to_string(),
        path: PathBuf::from(format!("{version:03}_{name}.sql")),
        sql: sql.to_string(),
    }
}

fn record(script: &MigrationScript) -> AppliedMigration {
    AppliedMigration {
        version: script.version,
        name: script.name.clone(),
        checksum: script.checksum(),
        applied_at: "2026-08-26 12:00:00".to_string(),
    }
}

#[test]
fn test_status_rows_fresh_database_all_pending() {
    let scripts = vec![script(1, "init", "CREATE TABLE a (id INTEGER);")];

    let rows = status_rows(&scripts, &[]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].state, MigrationState::Pending);
    assert!(rows[0].applied_at.is_none());
}

#[test]
fn test_status_rows_applied_and_pending_mix() {
    let scripts = vec![
        script(1, "init", "CREATE TABLE a (id INTEGER);"),
        script(2, "add_b", "CREATE TABLE b (id INTEGER);"),
    ];
    let applied = vec![record(&scripts[0])];

    let rows = status_rows(&scripts, &applied);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].state, MigrationState::Applied);
    assert_eq!(rows[0].applied_at.as_deref(), Some("2026-08-26 12:00:00"));
    assert_eq!(rows[1].state, MigrationState::Pending);
}

#[test]
fn test_status_rows_flags_edited_script() {
    let original = script(1, "init", "CREATE TABLE a (id INTEGER);");
    let applied = vec![record(&original)];
    let edited = vec![script(1, "init", "CREATE TABLE a (id INTEGER, x TEXT);")];

    let rows = status_rows(&edited, &applied);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].state, MigrationState::Changed);
}

#[test]
fn test_status_rows_flags_orphaned_record() {
    let scripts = vec![script(1, "init", "CREATE TABLE a (id INTEGER);")];
    let orphan = AppliedMigration {
        version: 7,
        name: "vanished".to_string(),
        checksum: "0".repeat(64),
        applied_at: "2026-08-26 12:00:00".to_string(),
    };
    let applied = vec![record(&scripts[0]), orphan];

    let rows = status_rows(&scripts, &applied);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].version, 7);
    assert_eq!(rows[1].name, "vanished");
    assert_eq!(rows[1].state, MigrationState::Missing);
}

#[test]
fn test_status_rows_sorted_by_version() {
    let scripts = vec![script(3, "late", "SELECT 3;")];
    let orphan = AppliedMigration {
        version: 1,
        name: "first".to_string(),
        checksum: "0".repeat(64),
        applied_at: "2026-08-26 12:00:00".to_string(),
    };

    let rows = status_rows(&scripts, &[orphan]);

    assert_eq!(rows[0].version, 1);
    assert_eq!(rows[1].version, 3);
}

#[test]
fn test_state_serializes_lowercase() {
    let json = serde_json::to_string(&MigrationState::Pending).unwrap();
    assert_eq!(json, "\"pending\"");

    let rows = vec![StatusRow {
        version: 2,
        name: "add_b".to_string(),
        state: MigrationState::Pending,
        applied_at: None,
    }];
    let json = serde_json::to_string(&rows).unwrap();
    assert!(json.contains("\"state\":\"pending\""));
    // skip_serializing_if drops the null applied_at entirely
    assert!(!json.contains("applied_at"));
}
