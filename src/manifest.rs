//! package.json snapshot parsing
//!
//! Only the `dependencies` and `devDependencies` tables matter. Both are kept
//! in document order so change events come out in the order the manifest
//! lists its packages.

use crate::models::DependencyType;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Package name -> declared version, in document order
pub type DependencyMap = IndexMap<String, String>;

/// Errors raised while parsing manifest text
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is not an object")]
    NotAnObject,
}

/// Parsed dependency state of one manifest at one revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSnapshot {
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

impl ManifestSnapshot {
    /// Parse manifest text.
    ///
    /// Missing tables are empty. Entries whose version is not a non-empty
    /// string are dropped, so they behave like absent packages.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Object(root) = value else {
            return Err(ManifestError::NotAnObject);
        };

        Ok(Self {
            dependencies: read_table(root.get("dependencies"), "dependencies"),
            dev_dependencies: read_table(root.get("devDependencies"), "devDependencies"),
        })
    }

    /// `dependencies` overlaid with `devDependencies`.
    ///
    /// A key present in both keeps its `dependencies` position and takes the
    /// `devDependencies` value.
    pub fn merged(&self) -> DependencyMap {
        let mut merged = self.dependencies.clone();
        for (name, version) in &self.dev_dependencies {
            merged.insert(name.clone(), version.clone());
        }
        merged
    }

    /// Dev membership wins when a package is listed in both tables.
    pub fn dependency_type(&self, package: &str) -> DependencyType {
        if self.dev_dependencies.contains_key(package) {
            DependencyType::DevDependency
        } else {
            DependencyType::Dependency
        }
    }
}

/// Default manifest file name
pub const DEFAULT_MANIFEST_NAME: &str = "package.json";

/// Decides which tracked paths are manifests.
#[derive(Debug, Clone)]
pub struct ManifestMatcher {
    file_name: String,
    exclude: GlobSet,
}

impl ManifestMatcher {
    /// Match files named `file_name` that match none of the `exclude` globs.
    pub fn new(file_name: impl Into<String>, exclude: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            file_name: file_name.into(),
            exclude: builder.build()?,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn matches(&self, path: &str) -> bool {
        let name_matches = Path::new(path)
            .file_name()
            .is_some_and(|name| name == self.file_name.as_str());
        name_matches && !self.exclude.is_match(path)
    }
}

impl Default for ManifestMatcher {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_MANIFEST_NAME.to_string(),
            exclude: GlobSet::empty(),
        }
    }
}

fn read_table(table: Option<&Value>, name: &str) -> DependencyMap {
    let mut map = DependencyMap::new();
    let Some(table) = table else {
        return map;
    };
    let Some(entries) = table.as_object() else {
        debug!("Ignoring non-object `{}` table", name);
        return map;
    };

    for (package, version) in entries {
        match version.as_str() {
            Some(v) if !v.is_empty() => {
                map.insert(package.clone(), v.to_string());
            }
            _ => debug!("Ignoring `{}` entry {} with no usable version", name, package),
        }
    }
    map
}
