//! Waypoint CLI - ordered SQL migrations with a versioned ledger

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli;
mod commands;

use cli::Cli;
use commands::{history, init, list, migrate};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Init => init::execute(&cli.global),
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global),
        cli::Commands::List(args) => list::execute(args, &cli.global),
        cli::Commands::History => history::execute(&cli.global),
    }
}

/// Log to stderr at info (debug with --verbose); RUST_LOG takes precedence.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
