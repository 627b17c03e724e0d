//! Change aggregator: runs the diff engine over every manifest in the repo

use super::diff::diff_history;
use super::reader::HistoryReader;
use crate::git::{DateWindow, RevisionSource};
use crate::manifest::ManifestMatcher;
use crate::models::ChangeEvent;
use tracing::{debug, info};

/// Counters from one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub manifests_found: usize,
    pub manifests_with_history: usize,
    pub revisions_scanned: usize,
    pub events: usize,
}

/// Collects change events for every manifest file.
pub struct ChangeAggregator<'a> {
    reader: HistoryReader<'a>,
    matcher: ManifestMatcher,
}

impl<'a> ChangeAggregator<'a> {
    pub fn new(source: &'a dyn RevisionSource) -> Self {
        Self {
            reader: HistoryReader::new(source),
            matcher: ManifestMatcher::default(),
        }
    }

    /// Use a custom manifest matcher.
    pub fn with_matcher(mut self, matcher: ManifestMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// All events in `window`.
    ///
    /// Files are visited in discovery order and each file's events stay in
    /// chronological order; nothing is re-sorted across files.
    pub fn run(&self, window: &DateWindow) -> Vec<ChangeEvent> {
        self.run_with_stats(window).0
    }

    pub fn run_with_stats(&self, window: &DateWindow) -> (Vec<ChangeEvent>, AggregateStats) {
        let files = self.reader.list_manifest_files(&self.matcher);
        let mut stats = AggregateStats {
            manifests_found: files.len(),
            ..Default::default()
        };
        let mut events = Vec::new();

        for path in &files {
            let revisions = self.reader.list_revisions(path, window);
            if revisions.is_empty() {
                debug!("No history for {} in window, skipping", path);
                continue;
            }

            stats.manifests_with_history += 1;
            stats.revisions_scanned += revisions.len();

            let file_events = diff_history(
                path,
                &revisions,
                |p, rev| self.reader.read_at(p, rev),
                |rev| self.reader.timestamp_of(rev),
            );
            debug!("{}: {} revisions, {} changes", path, revisions.len(), file_events.len());
            events.extend(file_events);
        }

        stats.events = events.len();
        info!(
            "Scanned {} manifests ({} with history in window), found {} dependency changes",
            stats.manifests_found, stats.manifests_with_history, stats.events
        );
        (events, stats)
    }
}
