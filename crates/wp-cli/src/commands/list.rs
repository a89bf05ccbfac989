//! List command implementation

use anyhow::{Context, Result};
use wp_core::Migrator;

use crate::cli::{GlobalArgs, ListArgs};
use crate::commands::common::{load_catalog, open_ledger};

/// Execute the list command
pub(crate) fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let catalog = load_catalog(global)?;
    let ledger = open_ledger(global, args.init)?;
    let status = Migrator::new(&catalog)
        .status(&ledger)
        .context("Failed to read migration status")?;

    println!("Applied(*)  VersionNumber  MigrationName");
    for item in &status {
        let applied = if item.applied { "Y" } else { "N" };
        println!(
            "{:<10}  {:<13}  {}",
            applied, item.entry.position, item.entry.name
        );
    }
    Ok(())
}
