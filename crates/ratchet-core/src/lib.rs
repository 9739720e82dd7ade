//! ratchet-core - Core library for Ratchet
//!
//! This crate provides the migration script model, directory discovery,
//! plan computation, and configuration parsing shared by the database
//! layer and the CLI.

pub mod config;
pub mod error;
pub mod plan;
pub mod script;

pub use config::{Config, DatabaseConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use plan::{plan, AppliedMigration, MigrationPlan};
pub use script::{discover_scripts, MigrationScript};
