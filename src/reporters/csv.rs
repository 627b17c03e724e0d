//! CSV reporter
//!
//! Fields are joined with bare commas and never quoted, so a value that
//! itself contains a comma will shift the columns of its row.

use crate::models::{ChangeEvent, ChangeType};

const HEADER: [&str; 7] = [
    "Library Name",
    "Package Path",
    "Dependency Type",
    "Change Type",
    "Commit Date",
    "Previous Version",
    "New Version",
];

/// Render events as CSV (header row first, no trailing newline)
pub fn render(events: &[ChangeEvent]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(events.iter().map(row));
    lines.join("\n")
}

fn row(event: &ChangeEvent) -> String {
    let (previous, new) = match event.change_type {
        ChangeType::Added => ("", event.new_version.as_str()),
        ChangeType::Modified => (event.old_version.as_str(), event.new_version.as_str()),
        ChangeType::Deleted => (event.old_version.as_str(), ""),
    };
    let dependency_type = event.dependency_type.to_string();
    let change_type = event.change_type.to_string();
    [
        event.package_name.as_str(),
        event.file_path.as_str(),
        dependency_type.as_str(),
        change_type.as_str(),
        event.commit_date.as_str(),
        previous,
        new,
    ]
    .join(",")
}
