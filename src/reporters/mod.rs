//! Output reporters for dependency change events
//!
//! Supports multiple output formats:
//! - `csv` - One row per change, spreadsheet friendly
//! - `json` - Machine-readable JSON array of events
//! - `human` - Changelog grouped by file, dependency table and package

mod csv;
mod human;
mod json;

use crate::models::ChangeEvent;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Csv,
    Json,
    #[default]
    Human,
}

impl OutputFormat {
    /// Name used in the "file created" confirmation
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Human => "Changelog",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: csv, json, human",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Human => write!(f, "human"),
        }
    }
}

/// Render events using an OutputFormat enum
pub fn report_with_format(events: &[ChangeEvent], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => Ok(csv::render(events)),
        OutputFormat::Json => json::render(events),
        OutputFormat::Human => Ok(human::render(events)),
    }
}
