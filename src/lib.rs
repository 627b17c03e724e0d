//! dep-history - dependency change history for package.json manifests
//!
//! The pipeline finds manifest files, reads each one at every revision that
//! touched it within a date window, diffs adjacent snapshots into
//! [`models::ChangeEvent`]s and renders them as CSV, JSON or a changelog.

pub mod cli;
pub mod config;
pub mod git;
pub mod manifest;
pub mod models;
pub mod pipeline;
pub mod reporters;
