//! Best-effort view over a [`RevisionSource`]
//!
//! Every backend failure is logged and folded into an empty or absent result
//! so a partially unreadable history still yields a report.

use crate::git::{DateWindow, RevisionSource};
use crate::manifest::{ManifestMatcher, ManifestSnapshot};
use tracing::warn;

pub struct HistoryReader<'a> {
    source: &'a dyn RevisionSource,
}

impl<'a> HistoryReader<'a> {
    pub fn new(source: &'a dyn RevisionSource) -> Self {
        Self { source }
    }

    /// Tracked manifest paths; empty on failure.
    pub fn list_manifest_files(&self, matcher: &ManifestMatcher) -> Vec<String> {
        self.source.list_files(matcher).unwrap_or_else(|e| {
            warn!("Failed to list {} files: {}", matcher.file_name(), e);
            Vec::new()
        })
    }

    /// Revisions touching `path` inside `window`, oldest first; empty on failure.
    pub fn list_revisions(&self, path: &str, window: &DateWindow) -> Vec<String> {
        match self.source.list_revisions(path, window) {
            Ok(mut revisions) => {
                revisions.reverse();
                revisions
            }
            Err(e) => {
                warn!(path, "Failed to list revisions: {}", e);
                Vec::new()
            }
        }
    }

    /// Parsed manifest at `revision`, or `None` if it cannot be read or parsed.
    pub fn read_at(&self, path: &str, revision: &str) -> Option<ManifestSnapshot> {
        let content = match self.source.read_at(path, revision) {
            Ok(content) => content,
            Err(e) => {
                warn!(path, revision, "Failed to read manifest: {}", e);
                return None;
            }
        };

        match ManifestSnapshot::parse(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path, revision, "Failed to parse manifest: {}", e);
                None
            }
        }
    }

    /// Commit time of `revision`; empty string on failure.
    pub fn timestamp_of(&self, revision: &str) -> String {
        self.source.timestamp_of(revision).unwrap_or_else(|e| {
            warn!(revision, "Failed to read commit date: {}", e);
            String::new()
        })
    }
}
