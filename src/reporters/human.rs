//! Human-readable changelog reporter
//!
//! Groups events by manifest, then by dependency table, then by package.
//! Every level keeps first-seen order and each package lists its changes in
//! the order they happened.
//!
//! ```text
//! ## package.json:
//! ### dependencies
//! - lodash
//!   - 2024-01-02 10:00:00 +0000: Added version ^4.17.21 (#1a2b3c)
//! ### devDependencies
//! - jest
//!   - 2024-01-02 10:00:00 +0000: Added version 29.0.0 (#1a2b3c)
//! ```

use crate::models::{ChangeEvent, ChangeType, DependencyType};
use indexmap::IndexMap;

/// package name -> change lines
type PackageChanges<'a> = IndexMap<&'a str, Vec<String>>;

#[derive(Default)]
struct FileSection<'a> {
    dependencies: PackageChanges<'a>,
    dev_dependencies: PackageChanges<'a>,
}

/// Render events as a grouped changelog
pub fn render(events: &[ChangeEvent]) -> String {
    let mut files: IndexMap<&str, FileSection<'_>> = IndexMap::new();

    for event in events {
        let section = files.entry(event.file_path.as_str()).or_default();
        let packages = match event.dependency_type {
            DependencyType::Dependency => &mut section.dependencies,
            DependencyType::DevDependency => &mut section.dev_dependencies,
        };
        packages
            .entry(event.package_name.as_str())
            .or_default()
            .push(change_line(event));
    }

    files
        .iter()
        .map(|(path, section)| {
            format!(
                "## {}:\n{}\n{}",
                path,
                format_category(DependencyType::Dependency, &section.dependencies),
                format_category(DependencyType::DevDependency, &section.dev_dependencies),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn change_line(event: &ChangeEvent) -> String {
    let detail = match event.change_type {
        ChangeType::Added => format!("Added version {}", event.new_version),
        ChangeType::Modified => format!(
            "Modified version {} -> {}",
            event.old_version, event.new_version
        ),
        ChangeType::Deleted => format!("Deleted version {}", event.old_version),
    };
    format!("  - {}: {} (#{})", event.commit_date, detail, event.commit_hash)
}

/// Empty string when the table saw no changes
fn format_category(kind: DependencyType, packages: &PackageChanges<'_>) -> String {
    if packages.is_empty() {
        return String::new();
    }
    let body = packages
        .iter()
        .map(|(name, changes)| format!("- {}\n{}", name, changes.join("\n")))
        .collect::<Vec<_>>()
        .join("\n");
    format!("### {}\n{}", kind.category(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{event, test_events};
    use ChangeType::*;
    use DependencyType::*;

    #[test]
    fn test_grouped_changelog() {
        let out = render(&test_events());
        let expected = "\
## package.json:
### dependencies
- lodash
  - 2024-01-03 10:00:00 +0000: Added version ^4.17.21 (#a1)
  - 2024-01-04 10:00:00 +0000: Modified version ^4.17.21 -> ^4.17.22 (#b22)
### devDependencies
- jest
  - 2024-01-03 10:00:00 +0000: Added version 29.0.0 (#a1)

## web/package.json:
### dependencies
- react
  - 2024-01-05 10:00:00 +0000: Deleted version 18.2.0 (#c333)
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_first_seen_order_not_alphabetical() {
        let events = vec![
            event("z/package.json", "zod", Dependency, Added, "", "3", "h1"),
            event("a/package.json", "axios", Dependency, Added, "", "1", "h2"),
            event("z/package.json", "ava", Dependency, Added, "", "5", "h3"),
        ];
        let out = render(&events);
        let z = out.find("## z/package.json:").expect("z section");
        let a = out.find("## a/package.json:").expect("a section");
        assert!(z < a);
        let zod = out.find("- zod").expect("zod");
        let ava = out.find("- ava").expect("ava");
        assert!(zod < ava);
    }

    #[test]
    fn test_dev_only_file_has_empty_dependencies_section() {
        let events = vec![event("package.json", "vite", DevDependency, Added, "", "5", "h1")];
        let out = render(&events);
        assert!(out.starts_with("## package.json:\n\n### devDependencies\n- vite\n"));
    }

    #[test]
    fn test_empty_changelog() {
        assert_eq!(render(&[]), "");
    }
}
