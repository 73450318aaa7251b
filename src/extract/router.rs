//! Partition routing
//!
//! An ordered list of named predicates. Each entry goes to the first
//! partition whose predicate accepts it, or nowhere.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Entry;

/// Name of the partition holding workflow files
pub const WORKFLOWS: &str = "workflows";

/// Name of the catch-all partition for other files of the directory
pub const AUXILIARIES: &str = "auxiliaries";

/// A workflow file directly under `.github/workflows/`
static WORKFLOW_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.github/workflows/[^/]*\.(yml|yaml)$").expect("Invalid workflow path regex")
});

pub type Predicate = fn(&Entry) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct Partition {
    pub name: &'static str,
    pub accepts: Predicate,
}

impl Partition {
    pub const fn new(name: &'static str, accepts: Predicate) -> Self {
        Self { name, accepts }
    }
}

/// Assigns entries to partitions, first match wins
#[derive(Debug, Clone)]
pub struct PartitionRouter {
    partitions: Vec<Partition>,
}

impl PartitionRouter {
    pub fn new(partitions: Vec<Partition>) -> Self {
        Self { partitions }
    }

    /// Workflow files, plus every other file when `save_auxiliaries` is set
    pub fn workflows(save_auxiliaries: bool) -> Self {
        let mut partitions = vec![Partition::new(WORKFLOWS, is_workflow_entry)];
        if save_auxiliaries {
            partitions.push(Partition::new(AUXILIARIES, any_entry));
        }
        Self::new(partitions)
    }

    /// Index of the partition receiving `entry`
    pub fn route(&self, entry: &Entry) -> Option<usize> {
        self.partitions
            .iter()
            .position(|partition| (partition.accepts)(entry))
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.partitions.iter().map(|partition| partition.name)
    }
}

pub fn is_workflow_path(path: &str) -> bool {
    WORKFLOW_PATH_REGEX.is_match(path)
}

/// A workflow path whose content is, or looks like, a workflow
pub fn is_workflow_entry(entry: &Entry) -> bool {
    is_workflow_path(entry.path()) && (entry.valid_workflow || entry.probably_workflow)
}

pub fn any_entry(_: &Entry) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, Commit, Validity};

    fn entry(path: &str, validity: Validity) -> Entry {
        Entry::new(
            &Commit::default(),
            ChangeType::Added,
            (Some(path.to_string()), None),
            (Some("h".to_string()), None),
            validity,
        )
    }

    fn workflow() -> Validity {
        Validity {
            valid_yaml: true,
            probably_workflow: true,
            valid_workflow: true,
        }
    }

    #[test]
    fn test_workflow_path() {
        assert!(is_workflow_path(".github/workflows/ci.yml"));
        assert!(is_workflow_path(".github/workflows/release.yaml"));
        assert!(!is_workflow_path(".github/workflows/README.md"));
        assert!(!is_workflow_path(".github/workflows/nested/ci.yml"));
        assert!(!is_workflow_path("x/.github/workflows/ci.yml"));
        assert!(!is_workflow_path(".github/workflows/ci.yml.bak"));
    }

    #[test]
    fn test_workflow_entry_needs_workflow_content() {
        assert!(is_workflow_entry(&entry(".github/workflows/ci.yml", workflow())));

        let probable_only = Validity {
            probably_workflow: true,
            ..Validity::default()
        };
        assert!(is_workflow_entry(&entry(".github/workflows/ci.yml", probable_only)));

        let plain_yaml = Validity {
            valid_yaml: true,
            ..Validity::default()
        };
        assert!(!is_workflow_entry(&entry(".github/workflows/ci.yml", plain_yaml)));
    }

    #[test]
    fn test_route_without_auxiliaries() {
        let router = PartitionRouter::workflows(false);

        assert_eq!(router.route(&entry(".github/workflows/ci.yml", workflow())), Some(0));
        assert_eq!(router.route(&entry(".github/workflows/README.md", workflow())), None);
        assert_eq!(router.names().collect::<Vec<_>>(), vec![WORKFLOWS]);
    }

    #[test]
    fn test_route_with_auxiliaries() {
        let router = PartitionRouter::workflows(true);

        assert_eq!(router.route(&entry(".github/workflows/ci.yml", workflow())), Some(0));
        assert_eq!(
            router.route(&entry(".github/workflows/README.md", Validity::default())),
            Some(1)
        );
        assert_eq!(
            router.route(&entry(".github/workflows/broken.yml", Validity::default())),
            Some(1)
        );
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_deletion_routes_on_previous_path() {
        let deleted = Entry::new(
            &Commit::default(),
            ChangeType::Deleted,
            (None, Some(".github/workflows/ci.yml".to_string())),
            (None, Some("h".to_string())),
            workflow(),
        );
        assert_eq!(PartitionRouter::workflows(false).route(&deleted), Some(0));
    }

    #[test]
    fn test_empty_router_drops_everything() {
        let router = PartitionRouter::new(Vec::new());
        assert!(router.is_empty());
        assert_eq!(router.route(&entry(".github/workflows/ci.yml", workflow())), None);
    }
}
