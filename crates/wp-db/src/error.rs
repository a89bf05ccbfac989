//! Error types for wp-db

use thiserror::Error;

/// Ledger database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Ledger table missing (D003)
    #[error("[D003] Ledger table not found: {0}. Run `wp init` first.")]
    LedgerMissing(String),

    /// Transaction management error (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured catalog errors, so a
        // missing ledger table is recognised from the message.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || (msg.contains("Catalog Error") && msg.contains("does not exist"))
        {
            DbError::LedgerMissing(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
