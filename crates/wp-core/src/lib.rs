//! wp-core - Core library for Waypoint
//!
//! This crate provides the SQL statement splitter, migration index decoding,
//! the migration catalog, the ledger contract, and the migration runner. It
//! has no database driver; `wp-db` supplies the DuckDB ledger.

pub mod catalog;
pub mod error;
pub mod index;
pub mod ledger;
pub mod runner;
pub mod splitter;

pub use catalog::{Catalog, MigrationEntry};
pub use error::{BackendError, CoreError, CoreResult};
pub use index::{find_index, IndexFormat, MigrationIndex};
pub use ledger::{AppliedMigration, Ledger, LedgerTransaction};
pub use runner::{EntryStatus, Migrator, Plan, PlanRequest, RunState};
pub use splitter::split_statements;
