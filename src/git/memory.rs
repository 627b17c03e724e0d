//! In-memory history for tests and embedding
//!
//! Commits are appended in chronological order; each one records the files it
//! changed. A `None` content marks a deletion.

use super::{DateWindow, HistoryError, RevisionSource};
use crate::manifest::ManifestMatcher;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
struct MemoryCommit {
    id: String,
    seconds: i64,
    changes: IndexMap<String, Option<String>>,
}

/// Linear, append-only history held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    commits: Vec<MemoryCommit>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a commit at `seconds` (unix time) and return its id.
    pub fn commit(&mut self, seconds: i64, changes: &[(&str, Option<&str>)]) -> String {
        let id = format!("{:040x}", self.commits.len() + 1);
        self.commits.push(MemoryCommit {
            id: id.clone(),
            seconds,
            changes: changes
                .iter()
                .map(|(path, content)| (path.to_string(), content.map(str::to_string)))
                .collect(),
        });
        id
    }

    /// Shorthand for a commit writing one file.
    pub fn write(&mut self, seconds: i64, path: &str, content: &str) -> String {
        self.commit(seconds, &[(path, Some(content))])
    }

    fn position(&self, revision: &str) -> Result<usize, HistoryError> {
        self.commits
            .iter()
            .position(|c| c.id == revision)
            .ok_or_else(|| HistoryError::UnknownRevision(revision.to_string()))
    }
}

impl RevisionSource for MemoryHistory {
    fn list_files(&self, matcher: &ManifestMatcher) -> Result<Vec<String>, HistoryError> {
        let mut tree: IndexMap<&str, bool> = IndexMap::new();
        for commit in &self.commits {
            for (path, content) in &commit.changes {
                tree.insert(path.as_str(), content.is_some());
            }
        }
        Ok(tree
            .into_iter()
            .filter(|(path, present)| *present && matcher.matches(path))
            .map(|(path, _)| path.to_string())
            .collect())
    }

    fn list_revisions(&self, path: &str, window: &DateWindow) -> Result<Vec<String>, HistoryError> {
        Ok(self
            .commits
            .iter()
            .rev()
            .filter(|c| c.changes.contains_key(path) && window.contains_seconds(c.seconds))
            .map(|c| c.id.clone())
            .collect())
    }

    fn read_at(&self, path: &str, revision: &str) -> Result<String, HistoryError> {
        let end = self.position(revision)?;
        self.commits[..=end]
            .iter()
            .rev()
            .find_map(|c| c.changes.get(path))
            .cloned()
            .flatten()
            .ok_or_else(|| HistoryError::PathNotFound {
                path: path.to_string(),
                revision: revision.to_string(),
            })
    }

    fn timestamp_of(&self, revision: &str) -> Result<String, HistoryError> {
        let seconds = self.commits[self.position(revision)?].seconds;
        Utc.timestamp_opt(seconds, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S %z").to_string())
            .ok_or(HistoryError::InvalidTimestamp(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_history_tracks_files() {
        let mut history = MemoryHistory::new();
        let a = history.write(100, "package.json", "one");
        let b = history.commit(200, &[("package.json", Some("two")), ("web/package.json", Some("{}"))]);
        let c = history.commit(300, &[("web/package.json", None)]);

        let files = history.list_files(&ManifestMatcher::default()).expect("files");
        assert_eq!(files, ["package.json"]);

        let revisions = history
            .list_revisions("package.json", &DateWindow::unbounded())
            .expect("revisions");
        assert_eq!(revisions, [b.clone(), a.clone()]);

        assert_eq!(history.read_at("package.json", &a).expect("read"), "one");
        assert_eq!(history.read_at("package.json", &c).expect("read"), "two");
        assert!(history.read_at("web/package.json", &c).is_err());
        assert!(history.read_at("package.json", "missing").is_err());
        assert_eq!(
            history.timestamp_of(&a).expect("timestamp"),
            "1970-01-01 00:01:40 +0000"
        );
    }
}
