//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Waypoint - ordered SQL migrations with a versioned ledger
#[derive(Parser, Debug)]
#[command(name = "wp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing the index file and migration scripts
    #[arg(
        short,
        long,
        global = true,
        env = "WP_MIGRATIONS",
        default_value = "."
    )]
    pub migrations: String,

    /// Explicit index file (skips discovery in the migrations directory)
    #[arg(short, long, global = true)]
    pub index: Option<String>,

    /// DuckDB database path, or :memory:
    #[arg(
        short,
        long,
        global = true,
        env = "WP_DSN",
        default_value = "waypoint.duckdb"
    )]
    pub dsn: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the migration ledger table
    Init,

    /// Apply outstanding migrations
    Migrate(MigrateArgs),

    /// Show each migration and whether it has been applied
    List(ListArgs),

    /// Show the ledger's applied migrations
    History,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Version to migrate from (default: the ledger's current version)
    #[arg(short, long, allow_negative_numbers = true)]
    pub from: Option<i64>,

    /// Version to stop before (default: end of the catalog)
    #[arg(short, long, allow_negative_numbers = true)]
    pub to: Option<i64>,

    /// Apply only these 0-based catalog indices, in order (ignores --from/--to range)
    #[arg(short, long, num_args = 1.., value_name = "INDEX")]
    pub select: Option<Vec<usize>>,

    /// Create the ledger table first if needed
    #[arg(long)]
    pub init: bool,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Create the ledger table first if needed
    #[arg(long)]
    pub init: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
