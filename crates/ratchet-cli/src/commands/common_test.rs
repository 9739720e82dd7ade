use super::*;
use ratchet_core::{Config, DatabaseConfig};
use std::collections::HashMap;

fn globals() -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        dir: None,
        database_url: None,
        config: None,
        target: None,
    }
}

fn config_with_db(path: &str) -> Config {
    Config {
        name: "actionlab".to_string(),
        migrations_dir: "db/migrations".to_string(),
        database: Some(DatabaseConfig {
            path: path.to_string(),
        }),
        targets: HashMap::new(),
    }
}

#[test]
fn test_normalize_database_url_strips_scheme() {
    assert_eq!(
        normalize_database_url("duckdb://data/app.duckdb"),
        "data/app.duckdb"
    );
    assert_eq!(normalize_database_url("duckdb:app.duckdb"), "app.duckdb");
    assert_eq!(normalize_database_url("app.duckdb"), "app.duckdb");
    assert_eq!(normalize_database_url(":memory:"), ":memory:");
}

#[test]
fn test_migrations_dir_flag_wins_over_config() {
    let mut global = globals();
    global.dir = Some("custom/migrations".to_string());
    let config = config_with_db("app.duckdb");

    let dir = migrations_dir(&global, Some(&config));
    assert_eq!(dir, PathBuf::from("custom/migrations"));
}

#[test]
fn test_migrations_dir_from_config() {
    let config = config_with_db("app.duckdb");
    let dir = migrations_dir(&globals(), Some(&config));
    assert_eq!(dir, PathBuf::from("./db/migrations"));
}

#[test]
fn test_migrations_dir_default_without_config() {
    let dir = migrations_dir(&globals(), None);
    assert_eq!(dir, PathBuf::from("migrations"));
}

#[test]
fn test_database_path_flag_wins_over_config() {
    let mut global = globals();
    global.database_url = Some("duckdb://override.duckdb".to_string());
    let config = config_with_db("configured.duckdb");

    let path = database_path(&global, Some(&config)).unwrap();
    assert_eq!(path, "override.duckdb");
}

#[test]
fn test_database_path_from_config() {
    let config = config_with_db("configured.duckdb");
    let path = database_path(&globals(), Some(&config)).unwrap();
    assert_eq!(path, "configured.duckdb");
}

#[test]
fn test_database_path_missing_everywhere_is_an_error() {
    let err = database_path(&globals(), None).unwrap_err();
    assert!(err.to_string().contains("No database specified"));
}

#[test]
fn test_database_path_target_without_config_is_an_error() {
    let mut global = globals();
    global.target = Some("prod".to_string());

    let err = database_path(&global, None).unwrap_err();
    assert!(err.to_string().contains("requires a ratchet.yml"));
}

#[test]
fn test_exit_code_display_is_empty() {
    assert_eq!(ExitCode(2).to_string(), "");
}

#[test]
fn test_calculate_column_widths_covers_headers_and_rows() {
    let widths = calculate_column_widths(
        &["VERSION", "NAME"],
        &[vec!["001".to_string(), "init_with_a_long_name".to_string()]],
    );
    assert_eq!(widths, vec![7, 21]);
}
