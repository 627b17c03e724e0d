//! Git history access using libgit2
//!
//! Walks first-parent history to find the commits touching a file and reads
//! file contents straight out of commit trees via the git2 crate.

use super::{DateWindow, HistoryError, RevisionSource};
use crate::manifest::ManifestMatcher;
use anyhow::{Context, Result};
use chrono::{FixedOffset, TimeZone};
use git2::{Commit, DiffOptions, ErrorCode, Oid, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Git history reader using libgit2.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open a git repository.
    ///
    /// # Arguments
    /// * `path` - Path to the repository (or any subdirectory)
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open git repository at {:?}", path))?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo })
    }

    /// Get the repository root path.
    pub fn repo_root(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .context("Repository has no working directory (bare repo?)")
    }

    fn find_commit(&self, revision: &str) -> Result<Commit<'_>, HistoryError> {
        Oid::from_str(revision)
            .and_then(|oid| self.repo.find_commit(oid))
            .map_err(|_| HistoryError::UnknownRevision(revision.to_string()))
    }

    /// Whether `commit` changed `path` relative to its first parent.
    fn touches_path(&self, commit: &Commit<'_>, path: &str) -> Result<bool, HistoryError> {
        let parent = commit.parent(0).ok();
        let tree = commit.tree()?;
        let parent_tree = parent.as_ref().map(|p| p.tree()).transpose()?;

        let mut diff_opts = DiffOptions::new();
        diff_opts.pathspec(path).disable_pathspec_match(true);

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;

        Ok(diff.deltas().len() > 0)
    }
}

impl RevisionSource for GitHistory {
    fn list_files(&self, matcher: &ManifestMatcher) -> Result<Vec<String>, HistoryError> {
        let head = self.repo.head()?;
        let tree = head.peel_to_tree()?;

        let mut files = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(git2::ObjectType::Blob) {
                let path = format!("{}{}", dir, entry.name().unwrap_or(""));
                if matcher.matches(&path) {
                    files.push(path);
                }
            }
            git2::TreeWalkResult::Ok
        })?;

        Ok(files)
    }

    fn list_revisions(&self, path: &str, window: &DateWindow) -> Result<Vec<String>, HistoryError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut revisions = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if !window.contains_seconds(commit.time().seconds()) {
                continue;
            }
            if self.touches_path(&commit, path)? {
                revisions.push(oid.to_string());
            }
        }

        debug!("{} revisions touch {} in window", revisions.len(), path);
        Ok(revisions)
    }

    fn read_at(&self, path: &str, revision: &str) -> Result<String, HistoryError> {
        let commit = self.find_commit(revision)?;
        let tree = commit.tree()?;

        let entry = tree.get_path(Path::new(path)).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                HistoryError::PathNotFound {
                    path: path.to_string(),
                    revision: revision.to_string(),
                }
            } else {
                HistoryError::Git(e)
            }
        })?;

        let blob = entry
            .to_object(&self.repo)?
            .into_blob()
            .map_err(|_| HistoryError::NotAFile {
                path: path.to_string(),
                revision: revision.to_string(),
            })?;

        String::from_utf8(blob.content().to_vec()).map_err(|_| HistoryError::NotUtf8 {
            path: path.to_string(),
            revision: revision.to_string(),
        })
    }

    fn timestamp_of(&self, revision: &str) -> Result<String, HistoryError> {
        let commit = self.find_commit(revision)?;
        format_git_time(&commit.time())
    }
}

/// Format a git timestamp the way `git log --format=%ci` does, keeping the
/// commit's own UTC offset.
fn format_git_time(time: &git2::Time) -> Result<String, HistoryError> {
    let dt = FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
        .ok_or(HistoryError::InvalidTimestamp(time.seconds()))?;
    Ok(dt.format("%Y-%m-%d %H:%M:%S %z").to_string())
}
