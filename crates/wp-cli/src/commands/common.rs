//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use wp_core::Catalog;
use wp_db::DuckDbLedger;

use crate::cli::GlobalArgs;

/// Build the catalog from `--index`, or from the index found in `--migrations`.
pub(crate) fn load_catalog(global: &GlobalArgs) -> Result<Catalog> {
    let catalog = match &global.index {
        Some(index) => Catalog::from_index_file(Path::new(index))
            .with_context(|| format!("Failed to load index file: {index}"))?,
        None => Catalog::from_dir(Path::new(&global.migrations)).with_context(|| {
            format!("Failed to load migrations from: {}", global.migrations)
        })?,
    };
    log::debug!(
        "Loaded {} migration(s) from {}: {}",
        catalog.len(),
        catalog.base_dir().display(),
        catalog.names().collect::<Vec<_>>().join(", ")
    );
    Ok(catalog)
}

/// Open the ledger database, provisioning the ledger table when `init` is set.
pub(crate) fn open_ledger(global: &GlobalArgs, init: bool) -> Result<DuckDbLedger> {
    let ledger = DuckDbLedger::new(&global.dsn)
        .with_context(|| format!("Failed to open database: {}", global.dsn))?;
    if init {
        ledger
            .init()
            .with_context(|| format!("Failed to initialize ledger in: {}", global.dsn))?;
    }
    Ok(ledger)
}
