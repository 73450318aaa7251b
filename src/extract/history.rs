//! Read-only view of a repository's history

use crate::git::GitError;
use crate::model::{Commit, DiffEntry};

/// What the walker needs from a repository
///
/// Blob content is read on demand through [`History::read_blob`] so that a
/// walk never holds more than the versions of the diff entry at hand.
pub trait History {
    /// First-parent commits reachable from `start`, excluding those reachable
    /// from `end`, restricted to commits touching `path`. Newest first.
    fn commits(&self, start: &str, end: Option<&str>, path: &str) -> Result<Vec<Commit>, GitError>;

    /// Changes between `parent` (or the empty tree) and `commit`
    fn diff(&self, parent: Option<&str>, commit: &str) -> Result<Vec<DiffEntry>, GitError>;

    /// Raw bytes of a blob
    fn read_blob(&self, blob: &str) -> Result<Vec<u8>, GitError>;

    /// Full hash of the commit a reference points to
    fn resolve(&self, reference: &str) -> Result<String, GitError>;
}
