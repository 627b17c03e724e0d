//! CLI definition and handler

use crate::config::{load_project_config, ManifestConfig};
use crate::git::{dates, DateWindow, GitHistory};
use crate::pipeline::ChangeAggregator;
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, warn};

/// dep-history - dependency changelog from git history
///
/// Reconstructs every package.json in the repository at each commit that
/// touched it and reports which dependencies were added, bumped or removed.
#[derive(Parser, Debug)]
#[command(name = "dep-history")]
#[command(
    version,
    about = "Report dependency additions, version changes and removals from git history",
    after_help = "\
Examples:
  dep-history --since 2024-01-01 --until now                Changelog for this year
  dep-history -s \"3 months ago\" -u today --format csv       CSV to stdout
  dep-history -s 2024-01-01 -u 2024-06-30 -f json -o deps.json
  dep-history -s 2023-01-01 -u now -C ../other-repo --manifest bower.json"
)]
pub struct Cli {
    /// Start of the history window
    ///
    /// Accepts YYYY-MM-DD, MM/DD/YYYY, YYYY/MM/DD, "Jan 1 2024", datetimes
    /// ("2024-01-01 10:30", RFC 3339), @<unix>, now, today, yesterday,
    /// "<N> <unit> ago", <N>.<unit>.ago and "last <unit>". A date without a
    /// time starts at 00:00:00 local time.
    #[arg(long, short = 's', value_parser = dates::parse_since)]
    pub since: String,

    /// End of the history window
    ///
    /// Same formats as --since. A date without a time ends at 23:59:59 local
    /// time, so the whole day is included.
    #[arg(long, short = 'u', value_parser = dates::parse_until)]
    pub until: String,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format: csv, json, human (default: human)
    #[arg(long, short = 'f', value_parser = ["csv", "json", "human"])]
    pub format: Option<String>,

    /// Path to repository (default: current directory)
    #[arg(long = "repo", short = 'C', default_value = ".")]
    pub repo: PathBuf,

    /// Manifest file name to track (default: package.json)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Run the report end to end.
///
/// History problems only produce log lines and a possibly empty report;
/// failing to write the output file is the one hard error.
pub fn run(cli: Cli) -> Result<()> {
    let window = DateWindow::parse(&cli.since, &cli.until)?;

    let history = match GitHistory::open(&cli.repo) {
        Ok(history) => Some(history),
        Err(e) => {
            error!("{:#}", e);
            None
        }
    };

    let config_root = history
        .as_ref()
        .and_then(|h| h.repo_root().ok())
        .unwrap_or(cli.repo.as_path());
    let config = load_project_config(config_root);

    let format = resolve_format(cli.format.as_deref(), config.defaults.format.as_deref());

    let matcher = match config.manifest.matcher(cli.manifest.as_deref()) {
        Ok(matcher) => matcher,
        Err(e) => {
            warn!("{:#}; ignoring exclude patterns", e);
            ManifestConfig {
                exclude: Vec::new(),
                ..config.manifest.clone()
            }
            .matcher(cli.manifest.as_deref())?
        }
    };

    let events = match &history {
        Some(history) => ChangeAggregator::new(history)
            .with_matcher(matcher)
            .run(&window),
        None => Vec::new(),
    };

    let output = reporters::report_with_format(&events, format)?;
    write_report(&output, format, cli.output.as_deref())
}

/// CLI flag, then config default, then `human`.
fn resolve_format(flag: Option<&str>, configured: Option<&str>) -> OutputFormat {
    if let Some(flag) = flag {
        if let Ok(format) = OutputFormat::from_str(flag) {
            return format;
        }
    }
    match configured.map(OutputFormat::from_str) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            warn!("Ignoring configured default format: {}", e);
            OutputFormat::default()
        }
        None => OutputFormat::default(),
    }
}

fn write_report(output: &str, format: OutputFormat, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} file \"{}\" has been created successfully.",
                format.label(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}
