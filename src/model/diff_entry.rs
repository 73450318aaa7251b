//! Diff entry data model
//!
//! Represents one file-level change from `git diff-tree --raw`.

use crate::git::constants::special;

/// One side (before or after) of a diff entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSide {
    pub path: String,

    /// Blob object id
    pub blob: String,

    /// Octal file mode (e.g. `100644`)
    pub mode: String,
}

impl DiffSide {
    pub fn new(path: impl Into<String>, blob: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            blob: blob.into(),
            mode: mode.into(),
        }
    }

    /// Submodule entries point to a commit, not to file content
    pub fn is_gitlink(&self) -> bool {
        self.mode == special::GITLINK_MODE
    }
}

/// A file-level change between two trees
///
/// Blob content is not held here; it is read on demand through the
/// repository so a history walk never materializes every version at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// Raw status as printed by git (`A`, `M`, `D`, `T`, `R100`, ...)
    pub status: String,

    /// Before side (`None` for a creation)
    pub old: Option<DiffSide>,

    /// After side (`None` for a deletion)
    pub new: Option<DiffSide>,
}

impl DiffEntry {
    pub fn old_path(&self) -> Option<&str> {
        self.old.as_ref().map(|side| side.path.as_str())
    }

    pub fn new_path(&self) -> Option<&str> {
        self.new.as_ref().map(|side| side.path.as_str())
    }

    /// Whether either side of the change lies inside `directory`
    pub fn touches(&self, directory: &str) -> bool {
        [self.old_path(), self.new_path()]
            .into_iter()
            .flatten()
            .any(|path| is_within(path, directory))
    }

    /// Whether either side is a submodule
    pub fn involves_gitlink(&self) -> bool {
        [self.old.as_ref(), self.new.as_ref()]
            .into_iter()
            .flatten()
            .any(DiffSide::is_gitlink)
    }
}

/// Directory containment on `/`-separated repository paths
///
/// An empty directory contains every path.
pub fn is_within(path: &str, directory: &str) -> bool {
    let directory = directory.trim_end_matches('/');
    if directory.is_empty() {
        return true;
    }
    path.strip_prefix(directory)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(old: &str, new: &str) -> DiffEntry {
        DiffEntry {
            status: "R100".to_string(),
            old: Some(DiffSide::new(old, "a".repeat(40), "100644")),
            new: Some(DiffSide::new(new, "a".repeat(40), "100644")),
        }
    }

    #[test]
    fn test_is_within_directory() {
        assert!(is_within(".github/workflows/ci.yml", ".github/workflows"));
        assert!(is_within(".github/workflows/ci.yml", ".github/workflows/"));
        assert!(is_within(".github/workflows/sub/x.yml", ".github/workflows"));
        assert!(!is_within(".github/workflows-old/ci.yml", ".github/workflows"));
        assert!(!is_within(".github/ci.yml", ".github/workflows"));
        assert!(is_within("anything", ""));
    }

    #[test]
    fn test_touches_either_side() {
        let into_dir = rename("ci.yml", ".github/workflows/ci.yml");
        assert!(into_dir.touches(".github/workflows"));

        let out_of_dir = rename(".github/workflows/ci.yml", "ci.yml");
        assert!(out_of_dir.touches(".github/workflows"));

        let elsewhere = rename("a.txt", "b.txt");
        assert!(!elsewhere.touches(".github/workflows"));
    }

    #[test]
    fn test_involves_gitlink() {
        let submodule = DiffEntry {
            status: "A".to_string(),
            old: None,
            new: Some(DiffSide::new(".github/workflows/vendor", "b".repeat(40), "160000")),
        };
        assert!(submodule.involves_gitlink());
        assert!(!rename("a", "b").involves_gitlink());
    }
}
