//! Dependency diff engine
//!
//! Compares each revision of a manifest with the one right before it and
//! turns the differences into [`ChangeEvent`]s. Only adjacent revisions are
//! ever compared.

use crate::manifest::ManifestSnapshot;
use crate::models::{ChangeEvent, ChangeType, DependencyType};

/// A package-level difference between two snapshots, before it is tied to a
/// file and revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChange {
    pub package_name: String,
    pub dependency_type: DependencyType,
    pub change_type: ChangeType,
    pub old_version: String,
    pub new_version: String,
}

impl PackageChange {
    fn into_event(self, file_path: &str, commit_hash: &str, commit_date: &str) -> ChangeEvent {
        ChangeEvent {
            package_name: self.package_name,
            file_path: file_path.to_string(),
            dependency_type: self.dependency_type,
            change_type: self.change_type,
            old_version: self.old_version,
            new_version: self.new_version,
            commit_date: commit_date.to_string(),
            commit_hash: commit_hash.to_string(),
        }
    }
}

/// Differences between two snapshots.
///
/// Additions and modifications come first, in the current snapshot's merged
/// key order, typed by the current snapshot. Deletions follow in the previous
/// snapshot's merged key order, typed by the previous snapshot.
pub fn diff_snapshots(previous: &ManifestSnapshot, current: &ManifestSnapshot) -> Vec<PackageChange> {
    let before = previous.merged();
    let after = current.merged();
    let mut changes = Vec::new();

    for (name, version) in &after {
        let (change_type, old_version) = match before.get(name) {
            None => (ChangeType::Added, String::new()),
            Some(old) if old != version => (ChangeType::Modified, old.clone()),
            Some(_) => continue,
        };
        changes.push(PackageChange {
            package_name: name.clone(),
            dependency_type: current.dependency_type(name),
            change_type,
            old_version,
            new_version: version.clone(),
        });
    }

    for (name, version) in &before {
        if after.contains_key(name) {
            continue;
        }
        changes.push(PackageChange {
            package_name: name.clone(),
            dependency_type: previous.dependency_type(name),
            change_type: ChangeType::Deleted,
            old_version: version.clone(),
            new_version: String::new(),
        });
    }

    changes
}

/// Walk `revisions` (oldest first) of the manifest at `path`.
///
/// For every index `i >= 1` both revision `i` and `i - 1` are fetched through
/// `read_at`; if either is missing the step produces nothing and the walk
/// moves on. Events of step `i` carry `revisions[i]` and its timestamp.
pub fn diff_history<R, T>(
    path: &str,
    revisions: &[String],
    mut read_at: R,
    mut timestamp_of: T,
) -> Vec<ChangeEvent>
where
    R: FnMut(&str, &str) -> Option<ManifestSnapshot>,
    T: FnMut(&str) -> String,
{
    let mut events = Vec::new();

    for pair in revisions.windows(2) {
        let (previous_rev, current_rev) = (&pair[0], &pair[1]);

        let Some(current) = read_at(path, current_rev) else {
            continue;
        };
        let Some(previous) = read_at(path, previous_rev) else {
            continue;
        };

        let changes = diff_snapshots(&previous, &current);
        if changes.is_empty() {
            continue;
        }

        let commit_date = timestamp_of(current_rev);
        events.extend(
            changes
                .into_iter()
                .map(|change| change.into_event(path, current_rev, &commit_date)),
        );
    }

    events
}
