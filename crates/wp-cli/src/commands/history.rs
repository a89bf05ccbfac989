//! History command implementation

use anyhow::{Context, Result};
use wp_core::Ledger;

use crate::cli::GlobalArgs;
use crate::commands::common::open_ledger;

/// Execute the history command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let ledger = open_ledger(global, false)?;
    let applied = ledger
        .applied()
        .with_context(|| format!("Failed to read ledger in: {}", global.dsn))?;

    if applied.is_empty() {
        println!("No migrations applied.");
        return Ok(());
    }

    println!("{:<13}  {:<40}  AppliedAt", "VersionNumber", "MigrationName");
    for migration in &applied {
        println!(
            "{:<13}  {:<40}  {}",
            migration.version,
            migration.name,
            migration.applied_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}
