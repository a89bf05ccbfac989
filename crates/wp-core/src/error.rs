//! Error types for wp-core

use thiserror::Error;

/// Boxed error raised by a ledger implementation.
///
/// The runner does not know which database sits behind the ledger, so backend
/// failures are carried as trait objects and classified by where they occur.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for Waypoint
#[derive(Error, Debug)]
pub enum CoreError {
    /// W001: No index file in the migrations directory
    #[error("[W001] Migration index not found: {path}")]
    IndexNotFound { path: String },

    /// W002: Index file extension has no decoder
    #[error("[W002] Unsupported index file format '{extension}' for {path}. Please use 'json' or 'yaml'.")]
    UnsupportedIndexFormat { path: String, extension: String },

    /// W003: Index file could not be decoded
    #[error("[W003] Failed to parse index {path}: {message}")]
    IndexParseError { path: String, message: String },

    /// W004: Catalog references a script that does not exist
    #[error("[W004] Missing migration file '{name}' (expected at {path})")]
    MissingScript { name: String, path: String },

    /// W005: IO error with file path context
    #[error("[W005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// W006: The ledger cannot report a version
    #[error("[W006] Unable to determine version of this database. Either the database does not exist or the migration_info table is missing: {source}")]
    LedgerUnavailable {
        #[source]
        source: BackendError,
    },

    /// W007: A statement failed inside a migration; that migration was rolled back
    #[error("[W007] Migration '{name}' to version {version} failed at statement {statement}: {source}")]
    ExecutionFailed {
        name: String,
        version: i64,
        statement: usize,
        #[source]
        source: BackendError,
    },

    /// W008: Explicit selection names an index outside the catalog
    #[error("[W008] Selected migration index {index} is out of range (catalog has {len} entries)")]
    SelectionOutOfRange { index: usize, len: usize },

    /// W009: Transaction begin, ledger record, or commit failed
    #[error("[W009] Transaction for migration '{name}' to version {version} failed: {source}")]
    TransactionFailed {
        name: String,
        version: i64,
        #[source]
        source: BackendError,
    },

    /// W010: The running version counter cannot advance past `i64::MAX`
    #[error("[W010] Cannot number migration '{name}': version {version} is already the maximum")]
    VersionOverflow { name: String, version: i64 },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
