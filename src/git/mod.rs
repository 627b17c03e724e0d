//! Version-control access
//!
//! The rest of the crate only ever talks to history through
//! [`RevisionSource`], a four-query read-only view of a repository:
//!
//! - list tracked manifest paths
//! - list revisions touching a path inside a date window (newest first)
//! - read a file as of a revision
//! - render a revision's commit time
//!
//! [`GitHistory`] implements it over libgit2; [`MemoryHistory`] is an
//! in-memory stand-in for tests.
//!
//! # Example
//!
//! ```no_run
//! use dep_history::git::{DateWindow, GitHistory, RevisionSource};
//! use dep_history::manifest::ManifestMatcher;
//! use std::path::Path;
//!
//! let history = GitHistory::open(Path::new("/path/to/repo")).unwrap();
//! let window = DateWindow::parse("2024-01-01", "now").unwrap();
//! for path in history.list_files(&ManifestMatcher::default()).unwrap() {
//!     let revisions = history.list_revisions(&path, &window).unwrap();
//!     println!("{path}: {} revisions", revisions.len());
//! }
//! ```

pub mod dates;
pub mod history;
pub mod memory;

pub use dates::{DateParseError, DateWindow};
pub use history::GitHistory;
pub use memory::MemoryHistory;

use crate::manifest::ManifestMatcher;
use thiserror::Error;

/// Errors raised by history backends
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("unknown revision {0}")]
    UnknownRevision(String),

    #[error("{path} does not exist at {revision}")]
    PathNotFound { path: String, revision: String },

    #[error("{path} at {revision} is not a regular file")]
    NotAFile { path: String, revision: String },

    #[error("{path} at {revision} is not valid UTF-8")]
    NotUtf8 { path: String, revision: String },

    #[error("commit time {0} is out of range")]
    InvalidTimestamp(i64),
}

/// Read-only queries over a repository's history.
pub trait RevisionSource {
    /// Tracked paths (at HEAD) accepted by `matcher`.
    fn list_files(&self, matcher: &ManifestMatcher) -> Result<Vec<String>, HistoryError>;

    /// Ids of revisions that modified `path` inside `window`, newest first.
    fn list_revisions(&self, path: &str, window: &DateWindow) -> Result<Vec<String>, HistoryError>;

    /// File text at `revision`.
    fn read_at(&self, path: &str, revision: &str) -> Result<String, HistoryError>;

    /// Commit time of `revision` as `YYYY-MM-DD HH:MM:SS ±HHMM`.
    fn timestamp_of(&self, revision: &str) -> Result<String, HistoryError>;
}
