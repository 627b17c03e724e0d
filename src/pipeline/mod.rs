//! Dependency-change extraction pipeline
//!
//! 1. Find manifest files ([`HistoryReader::list_manifest_files`])
//! 2. List the revisions touching each one inside the date window
//! 3. Diff each pair of adjacent snapshots ([`diff_history`])
//! 4. Concatenate per-file events ([`ChangeAggregator`])
//!
//! Execution is sequential. Each file's events are computed independently
//! and appended in discovery order.

pub mod aggregate;
pub mod diff;
pub mod reader;

pub use aggregate::{AggregateStats, ChangeAggregator};
pub use diff::{diff_history, diff_snapshots, PackageChange};
pub use reader::HistoryReader;
