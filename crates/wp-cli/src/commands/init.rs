//! Init command implementation - provisions the migration ledger

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::open_ledger;

/// Execute the init command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ledger = open_ledger(global, false)?;
    let existed = ledger
        .is_initialized()
        .with_context(|| format!("Failed to inspect database: {}", global.dsn))?;
    if existed {
        println!("Migration ledger already exists in {}", global.dsn);
        return Ok(());
    }

    ledger
        .init()
        .with_context(|| format!("Failed to initialize ledger in: {}", global.dsn))?;
    println!("Initialized migration ledger in {}", global.dsn);
    Ok(())
}
