//! Change classification
//!
//! Turns a raw diff entry into the change type recorded in the dataset and
//! the blob sides whose content has to be read.

use std::fmt;

use crate::model::{ChangeType, Commit, DiffEntry, DiffSide};

/// Why a diff entry produced no dataset entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A status the extraction does not handle (copy, unmerged, ...)
    UnknownStatus(String),

    /// One side is a submodule commit, which has no content
    Submodule(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStatus(status) => write!(f, "unsupported change type '{}'", status),
            Self::Submodule(path) => write!(f, "submodule at '{}'", path),
        }
    }
}

/// The blobs and paths one change is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobParameters<'a> {
    /// Change type as recorded (renames already folded into `Modified`)
    pub change_type: ChangeType,

    /// Change type as reported by git, before folding
    pub raw_type: ChangeType,

    /// Content after the change (`None` for a deletion)
    pub current: Option<&'a DiffSide>,

    /// Content before the change (`None` for an addition)
    pub previous: Option<&'a DiffSide>,
}

impl BlobParameters<'_> {
    pub fn current_path(&self) -> Option<&str> {
        self.current.map(|side| side.path.as_str())
    }

    pub fn previous_path(&self) -> Option<&str> {
        self.previous.map(|side| side.path.as_str())
    }

    /// Old and new blob ids are the same (pure rename)
    pub fn same_content(&self) -> bool {
        matches!(
            (self.current, self.previous),
            (Some(current), Some(previous)) if current.blob == previous.blob
        )
    }
}

/// Map a diff entry of `commit` to blob parameters
///
/// A commit without parents is diffed against the empty tree, so everything
/// it carries is an addition, whatever git reported.
pub fn classify_diff<'a>(
    entry: &'a DiffEntry,
    commit: &Commit,
) -> Result<BlobParameters<'a>, SkipReason> {
    if entry.involves_gitlink() {
        let path = entry.new_path().or(entry.old_path()).unwrap_or_default();
        return Err(SkipReason::Submodule(path.to_string()));
    }

    let raw_type = ChangeType::from_status(&entry.status)
        .ok_or_else(|| SkipReason::UnknownStatus(entry.status.clone()))?;

    if commit.is_root() && (entry.new.is_some() || entry.old.is_some()) {
        return Ok(BlobParameters {
            change_type: ChangeType::Added,
            raw_type,
            current: entry.new.as_ref().or(entry.old.as_ref()),
            previous: None,
        });
    }

    let (change_type, current, previous) = match raw_type {
        ChangeType::Added => (ChangeType::Added, entry.new.as_ref(), None),
        ChangeType::Deleted => (ChangeType::Deleted, None, entry.old.as_ref()),
        ChangeType::Modified | ChangeType::Renamed => {
            (ChangeType::Modified, entry.new.as_ref(), entry.old.as_ref())
        }
    };

    if current.is_none() && previous.is_none() {
        return Err(SkipReason::UnknownStatus(entry.status.clone()));
    }

    Ok(BlobParameters {
        change_type,
        raw_type,
        current,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Signature;

    fn commit(parents: &[&str]) -> Commit {
        Commit {
            id: "c".repeat(40),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            author: Signature::new("a", "a@x"),
            committer: Signature::new("a", "a@x"),
            committed_at: 0,
            authored_at: 0,
        }
    }

    fn side(path: &str, blob: &str) -> Option<DiffSide> {
        Some(DiffSide::new(path, blob, "100644"))
    }

    fn entry(status: &str, old: Option<DiffSide>, new: Option<DiffSide>) -> DiffEntry {
        DiffEntry {
            status: status.to_string(),
            old,
            new,
        }
    }

    #[test]
    fn test_added() {
        let diff = entry("A", None, side("w/a.yml", "b1"));
        let params = classify_diff(&diff, &commit(&["p"])).unwrap();

        assert_eq!(params.change_type, ChangeType::Added);
        assert_eq!(params.current_path(), Some("w/a.yml"));
        assert!(params.previous.is_none());
    }

    #[test]
    fn test_deleted() {
        let diff = entry("D", side("w/a.yml", "b1"), None);
        let params = classify_diff(&diff, &commit(&["p"])).unwrap();

        assert_eq!(params.change_type, ChangeType::Deleted);
        assert!(params.current.is_none());
        assert_eq!(params.previous_path(), Some("w/a.yml"));
    }

    #[test]
    fn test_modified_and_type_change() {
        for status in ["M", "T"] {
            let diff = entry(status, side("w/a.yml", "b1"), side("w/a.yml", "b2"));
            let params = classify_diff(&diff, &commit(&["p"])).unwrap();

            assert_eq!(params.change_type, ChangeType::Modified);
            assert_eq!(params.current.unwrap().blob, "b2");
            assert_eq!(params.previous.unwrap().blob, "b1");
            assert!(!params.same_content());
        }
    }

    #[test]
    fn test_rename_is_folded_into_modified() {
        let diff = entry("R100", side("w/a.yml", "b1"), side("w/b.yml", "b1"));
        let params = classify_diff(&diff, &commit(&["p"])).unwrap();

        assert_eq!(params.change_type, ChangeType::Modified);
        assert_eq!(params.raw_type, ChangeType::Renamed);
        assert_eq!(params.current_path(), Some("w/b.yml"));
        assert_eq!(params.previous_path(), Some("w/a.yml"));
        assert!(params.same_content());
    }

    #[test]
    fn test_root_commit_forces_added() {
        let root = commit(&[]);
        for diff in [
            entry("A", None, side("w/a.yml", "b1")),
            entry("M", side("w/a.yml", "b0"), side("w/a.yml", "b1")),
            entry("R090", side("w/old.yml", "b0"), side("w/a.yml", "b1")),
        ] {
            let params = classify_diff(&diff, &root).unwrap();
            assert_eq!(params.change_type, ChangeType::Added);
            assert_eq!(params.current.unwrap().blob, "b1");
            assert!(params.previous.is_none());
        }
    }

    #[test]
    fn test_root_commit_deletion_keeps_old_side_as_added() {
        let diff = entry("D", side("w/a.yml", "b0"), None);
        let params = classify_diff(&diff, &commit(&[])).unwrap();

        assert_eq!(params.change_type, ChangeType::Added);
        assert_eq!(params.current_path(), Some("w/a.yml"));
    }

    #[test]
    fn test_unknown_status_is_skipped() {
        for status in ["C075", "U", "X", "Z", ""] {
            let diff = entry(status, side("w/a.yml", "b1"), side("w/b.yml", "b1"));
            assert_eq!(
                classify_diff(&diff, &commit(&["p"])),
                Err(SkipReason::UnknownStatus(status.to_string()))
            );
        }
    }

    #[test]
    fn test_submodule_is_skipped() {
        let diff = entry(
            "A",
            None,
            Some(DiffSide::new("w/vendor", "b1", "160000")),
        );
        assert_eq!(
            classify_diff(&diff, &commit(&["p"])),
            Err(SkipReason::Submodule("w/vendor".to_string()))
        );
    }

    #[test]
    fn test_added_without_new_side_is_skipped() {
        let diff = entry("A", None, None);
        assert!(classify_diff(&diff, &commit(&["p"])).is_err());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::UnknownStatus("C075".to_string()).to_string(),
            "unsupported change type 'C075'"
        );
        assert_eq!(
            SkipReason::Submodule("w/vendor".to_string()).to_string(),
            "submodule at 'w/vendor'"
        );
    }
}
