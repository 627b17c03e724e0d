//! Project-level configuration support
//!
//! Loads per-project configuration from `dep-history.toml` or
//! `.dep-historyrc.json` in the repository root.
//!
//! # Configuration Format
//!
//! ```toml
//! # dep-history.toml
//!
//! [manifest]
//! file_name = "package.json"
//! exclude = ["vendor/**", "**/fixtures/**"]
//!
//! [defaults]
//! format = "csv"
//! ```

use crate::manifest::{ManifestMatcher, DEFAULT_MANIFEST_NAME};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Project configuration loaded from the repository root
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Which files count as manifests
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Defaults for CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Manifest discovery settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestConfig {
    /// Manifest file name (default: package.json)
    #[serde(default)]
    pub file_name: Option<String>,

    /// Glob patterns of manifest paths to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ManifestConfig {
    /// Build a matcher, letting `override_name` (from the CLI) win over the config.
    pub fn matcher(&self, override_name: Option<&str>) -> anyhow::Result<ManifestMatcher> {
        let file_name = override_name
            .or(self.file_name.as_deref())
            .unwrap_or(DEFAULT_MANIFEST_NAME);
        ManifestMatcher::new(file_name, &self.exclude).context("Invalid manifest exclude pattern")
    }
}

/// CLI defaults that can be set in config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliDefaults {
    /// Default output format (csv, json, human)
    #[serde(default)]
    pub format: Option<String>,
}

/// Load project configuration from the repository root.
///
/// Searches for configuration files in this order:
/// 1. `dep-history.toml`
/// 2. `.dep-historyrc.json`
///
/// Returns default configuration if no config file is found or the one found
/// cannot be read.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    let toml_path = repo_path.join("dep-history.toml");
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = repo_path.join(".dep-historyrc.json");
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
