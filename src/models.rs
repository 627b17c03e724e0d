//! Core data models for dep-history
//!
//! A [`ChangeEvent`] is one detected transition of a single package's
//! declared version in one manifest file between two adjacent revisions.

use serde::{Deserialize, Serialize};

/// Which dependency table a package belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyType {
    Dependency,
    DevDependency,
}

impl DependencyType {
    /// Section heading used by the changelog reporter
    pub fn category(&self) -> &'static str {
        match self {
            DependencyType::Dependency => "dependencies",
            DependencyType::DevDependency => "devDependencies",
        }
    }
}

impl std::fmt::Display for DependencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyType::Dependency => write!(f, "dependency"),
            DependencyType::DevDependency => write!(f, "devDependency"),
        }
    }
}

/// Kind of version transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Added => write!(f, "added"),
            ChangeType::Modified => write!(f, "modified"),
            ChangeType::Deleted => write!(f, "deleted"),
        }
    }
}

/// One add/modify/delete of a package between two adjacent revisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub package_name: String,
    /// Repository-relative manifest path
    pub file_path: String,
    pub dependency_type: DependencyType,
    pub change_type: ChangeType,
    /// Empty for `added`
    pub old_version: String,
    /// Empty for `deleted`
    pub new_version: String,
    /// Commit time of the revision that introduced the change
    pub commit_date: String,
    /// Revision that introduced the change
    pub commit_hash: String,
}
