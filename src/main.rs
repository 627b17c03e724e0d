//! dep-history - dependency changelog from git history
//!
//! Scans every package.json in a repository, replays its history inside a
//! date window and reports dependency additions, upgrades and removals.

use anyhow::Result;
use clap::Parser;
use dep_history::cli;
use std::io::IsTerminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the report
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();

    cli::run(cli)
}
