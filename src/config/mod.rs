//! Configuration module for dep-history
//!
//! This module handles:
//! - Project-level configuration (dep-history.toml)
//! - Manifest discovery settings
//! - CLI defaults

mod project_config;

pub use project_config::{load_project_config, CliDefaults, ManifestConfig, ProjectConfig};
