//! DuckDB ledger implementation

use crate::error::{DbError, DbResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::Connection;
use std::path::Path;
use wp_core::{AppliedMigration, Ledger, LedgerTransaction};

/// Table that records applied migrations
pub const LEDGER_TABLE: &str = "migration_info";

/// Provisions the ledger. Safe to run repeatedly.
const LEDGER_DDL: &str = "CREATE SEQUENCE IF NOT EXISTS migration_info_id_seq START 1;
CREATE TABLE IF NOT EXISTS migration_info (
    migration_id   BIGINT PRIMARY KEY DEFAULT nextval('migration_info_id_seq'),
    version        BIGINT NOT NULL,
    name           VARCHAR NOT NULL,
    migration_date TIMESTAMP NOT NULL
);";

/// Text form used to move timestamps in and out of DuckDB.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// DuckDB-backed migration ledger
///
/// Owns one connection. Single-threaded: migrations are applied one at a
/// time, so no `Mutex` is needed.
pub struct DuckDbLedger {
    conn: Connection,
}

impl DuckDbLedger {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create a new in-memory database
    pub fn open_in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open from a DSN string (handles the `:memory:` special case)
    pub fn new(dsn: &str) -> DbResult<Self> {
        if dsn == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(dsn))
        }
    }

    /// Borrow the underlying DuckDB connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the ledger sequence and table if they do not exist
    pub fn init(&self) -> DbResult<()> {
        log::debug!("Provisioning ledger table {LEDGER_TABLE}");
        self.conn.execute_batch(LEDGER_DDL).map_err(|e| {
            DbError::ExecutionError(format!("failed to create {LEDGER_TABLE} table: {e}"))
        })
    }

    /// Whether the ledger table exists
    pub fn is_initialized(&self) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
            duckdb::params![LEDGER_TABLE],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl Ledger for DuckDbLedger {
    type Error = DbError;
    type Transaction<'a> = DuckDbTransaction<'a>;

    fn current_version(&self) -> DbResult<Option<i64>> {
        let version = self.conn.query_row(
            "SELECT MAX(version) FROM migration_info",
            [],
            |row| row.get::<_, Option<i64>>(0),
        )?;
        Ok(version)
    }

    fn applied(&self) -> DbResult<Vec<AppliedMigration>> {
        let mut stmt = self.conn.prepare(
            "SELECT version, name, CAST(migration_date AS VARCHAR)
             FROM migration_info
             ORDER BY version, migration_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(version, name, applied_at)| -> DbResult<AppliedMigration> {
                Ok(AppliedMigration {
                    version,
                    name,
                    applied_at: parse_timestamp(&applied_at)?,
                })
            })
            .collect()
    }

    fn begin(&mut self) -> DbResult<DuckDbTransaction<'_>> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;
        Ok(DuckDbTransaction { tx })
    }
}

/// One migration's transaction. Rolls back when dropped uncommitted.
pub struct DuckDbTransaction<'conn> {
    tx: duckdb::Transaction<'conn>,
}

impl LedgerTransaction for DuckDbTransaction<'_> {
    type Error = DbError;

    fn execute(&mut self, statement: &str) -> DbResult<()> {
        self.tx
            .execute_batch(statement)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {}", statement.trim())))
    }

    fn record_applied(
        &mut self,
        version: i64,
        name: &str,
        applied_at: DateTime<Utc>,
    ) -> DbResult<()> {
        let applied_at = applied_at.format(TIMESTAMP_FORMAT).to_string();
        self.tx.execute(
            "INSERT INTO migration_info (version, name, migration_date)
             VALUES (?, ?, CAST(? AS TIMESTAMP))",
            duckdb::params![version, name, applied_at],
        )?;
        Ok(())
    }

    fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

/// Parse DuckDB's text rendering of a TIMESTAMP (fraction optional).
fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DbError::ExecutionError(format!("invalid migration_date '{value}': {e}")))
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
