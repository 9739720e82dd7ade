use super::*;

#[test]
fn test_lock_messages_classified_as_concurrent() {
    assert!(is_lock_conflict(
        "IO Error: Could not set lock on file \"/tmp/db.duckdb\": Conflicting lock is held"
    ));
    assert!(is_lock_conflict(
        "TransactionContext Error: write-write conflict on table players"
    ));
}

#[test]
fn test_ordinary_sql_errors_not_classified_as_concurrent() {
    assert!(!is_lock_conflict("Parser Error: syntax error at or near \"CREAT\""));
    assert!(!is_lock_conflict("Catalog Error: Table with name players does not exist"));
    assert!(!is_lock_conflict("Constraint Error: Duplicate key violates primary key"));
}

#[test]
fn test_core_errors_pass_through_transparently() {
    let core = CoreError::DuplicateVersion {
        version: 1,
        first: "001_a".to_string(),
        second: "001_b".to_string(),
    };
    let db: DbError = core.into();
    // transparent wrapping keeps the core diagnostic code
    assert!(db.to_string().starts_with("[C002]"));
}
