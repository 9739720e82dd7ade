//! ratchet-db - DuckDB layer for Ratchet
//!
//! Owns the target database connection, the bookkeeping ledger, and the
//! applier that runs pending scripts inside per-script transactions.

pub mod apply;
pub mod connection;
pub mod error;
pub mod ledger;

pub use apply::{apply, apply_plan, apply_script, ApplyOutcome};
pub use connection::TargetDb;
pub use error::{DbError, DbResult};
