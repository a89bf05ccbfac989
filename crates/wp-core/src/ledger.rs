//! Ledger and executor contract
//!
//! The runner never talks to a database directly. It borrows a [`Ledger`] for
//! the duration of a call and asks it for one [`LedgerTransaction`] per
//! migration entry. Statements and the version record for that entry go
//! through the same handle, so they commit or roll back together.

use chrono::{DateTime, Utc};

/// One row of the ledger history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Version assigned when the migration ran
    pub version: i64,
    /// Script name as listed in the catalog
    pub name: String,
    /// Commit time (UTC)
    pub applied_at: DateTime<Utc>,
}

/// A transaction scoped to a single migration entry.
///
/// Dropping a handle without calling [`commit`](Self::commit) must discard
/// everything executed through it.
pub trait LedgerTransaction {
    /// Error raised by the backing store
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute one statement produced by the splitter
    fn execute(&mut self, statement: &str) -> Result<(), Self::Error>;

    /// Append a ledger record as part of this transaction
    fn record_applied(
        &mut self,
        version: i64,
        name: &str,
        applied_at: DateTime<Utc>,
    ) -> Result<(), Self::Error>;

    /// Make the statements and the record durable
    fn commit(self) -> Result<(), Self::Error>;

    /// Discard everything executed through this handle
    fn rollback(self) -> Result<(), Self::Error>;
}

/// Durable store of applied migrations
pub trait Ledger {
    /// Error raised by the backing store
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transaction handle, borrowed from the ledger for one entry
    type Transaction<'a>: LedgerTransaction<Error = Self::Error>
    where
        Self: 'a;

    /// Highest recorded version, or `None` when nothing has been applied.
    ///
    /// An error means the ledger itself could not be read (missing table,
    /// unreachable store), never "no migrations yet".
    fn current_version(&self) -> Result<Option<i64>, Self::Error>;

    /// Every recorded migration, oldest first
    fn applied(&self) -> Result<Vec<AppliedMigration>, Self::Error>;

    /// Open a transaction for one migration entry
    fn begin(&mut self) -> Result<Self::Transaction<'_>, Self::Error>;
}
