//! wp-db - DuckDB ledger for Waypoint
//!
//! This crate provides [`DuckDbLedger`], the `wp_core::Ledger` implementation
//! that stores applied migrations in a `migration_info` table and runs each
//! migration inside a DuckDB transaction.

pub mod duckdb;
pub mod error;

pub use crate::duckdb::{DuckDbLedger, DuckDbTransaction, LEDGER_TABLE};
pub use error::{DbError, DbResult};
