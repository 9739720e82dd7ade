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

fn record(s: &MigrationScript) -> AppliedMigration {
    AppliedMigration {
        version: s.version,
        name: s.name.clone(),
        checksum: s.checksum(),
        applied_at: "2024-01-01 00:00:00".to_string(),
    }
}

#[test]
fn test_empty_ledger_leaves_everything_pending() {
    let scripts = vec![script(1, "init", "SELECT 1;"), script(2, "next", "SELECT 2;")];
    let p = plan(&scripts, &[]).unwrap();
    assert_eq!(p.already_applied, 0);
    assert_eq!(p.pending.len(), 2);
    assert!(!p.is_up_to_date());
}

#[test]
fn test_applied_scripts_are_skipped() {
    let scripts = vec![script(1, "init", "SELECT 1;"), script(2, "next", "SELECT 2;")];
    let applied = vec![record(&scripts[0])];

    let p = plan(&scripts, &applied).unwrap();
    assert_eq!(p.already_applied, 1);
    assert_eq!(p.pending.len(), 1);
    assert_eq!(p.pending[0].version, 2);
}

#[test]
fn test_fully_applied_is_up_to_date() {
    let scripts = vec![script(1, "init", "SELECT 1;"), script(2, "next", "SELECT 2;")];
    let applied: Vec<AppliedMigration> = scripts.iter().map(record).collect();

    let p = plan(&scripts, &applied).unwrap();
    assert!(p.is_up_to_date());
    assert_eq!(p.already_applied, 2);
}

#[test]
fn test_pending_is_sorted_by_version() {
    // discovery sorts, but plan() does not rely on it
    let scripts = vec![
        script(3, "c", "SELECT 3;"),
        script(1, "a", "SELECT 1;"),
        script(2, "b", "SELECT 2;"),
    ];
    let p = plan(&scripts, &[]).unwrap();
    let versions: Vec<u32> = p.pending.iter().map(|s| s.version).collect();
    assert_eq!(versions, vec![1, 2, 3]);
}

#[test]
fn test_orphaned_record_is_rejected() {
    let scripts = vec![script(2, "next", "SELECT 2;")];
    let applied = vec![AppliedMigration {
        version: 1,
        name: "init".to_string(),
        checksum: "deadbeef".to_string(),
        applied_at: "2024-01-01 00:00:00".to_string(),
    }];

    let err = plan(&scripts, &applied).unwrap_err();
    match err {
        CoreError::RecordWithoutScript { version, name } => {
            assert_eq!(version, 1);
            assert_eq!(name, "init");
        }
        other => panic!("expected RecordWithoutScript, got {other:?}"),
    }
}

#[test]
fn test_edited_applied_script_is_rejected() {
    let scripts = vec![script(1, "init", "SELECT 1; -- edited after apply")];
    let mut rec = record(&scripts[0]);
    rec.checksum = script(1, "init", "SELECT 1;").checksum();

    let err = plan(&scripts, &[rec]).unwrap_err();
    assert!(matches!(err, CoreError::ScriptChanged { .. }));
}

#[test]
fn test_out_of_order_script_is_rejected() {
    // 002 already applied, then 001 lands on disk
    let scripts = vec![script(1, "late", "SELECT 1;"), script(2, "next", "SELECT 2;")];
    let applied = vec![record(&scripts[1])];

    let err = plan(&scripts, &applied).unwrap_err();
    match err {
        CoreError::OutOfOrderScript { label, newest } => {
            assert_eq!(label, "001_late");
            assert_eq!(newest, 2);
        }
        other => panic!("expected OutOfOrderScript, got {other:?}"),
    }
}

#[test]
fn test_applied_label_matches_script_form() {
    let rec = AppliedMigration {
        version: 2,
        name: "add_player_name".to_string(),
        checksum: String::new(),
        applied_at: String::new(),
    };
    assert_eq!(rec.label(), "002_add_player_name");
}
