//! Migrate command implementation

use anyhow::{Context, Result};
use wp_core::{Migrator, PlanRequest};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_catalog, open_ledger};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let catalog = load_catalog(global)?;
    let mut ledger = open_ledger(global, args.init)?;
    let mut migrator = Migrator::new(&catalog);

    let request = PlanRequest {
        from_version: args.from,
        to_version: args.to,
        selection: args.select.clone(),
    };
    let plan = migrator
        .plan(&ledger, &request)
        .context("Failed to plan migrations")?;

    if plan.is_empty() {
        println!(
            "Database is already up to date at version: {}",
            plan.from_version
        );
        return Ok(());
    }

    let mut version = plan.from_version;
    migrator
        .apply_with(&mut ledger, &plan.entries, plan.from_version, |entry, applied| {
            version = applied;
            println!(
                "Running migration {} to version {}: SUCCESS!",
                entry.name, applied
            );
        })
        .context("Migration run failed")?;

    println!(
        "\nApplied {} migration(s). Database is at version: {}",
        plan.entries.len(),
        version
    );
    Ok(())
}
