//! Dataset entry data model

use serde::Serialize;

use super::{ChangeType, Commit};

/// Outcome of the three-tier workflow classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Validity {
    /// The content parses as YAML
    pub valid_yaml: bool,

    /// The content looks like a workflow (`on` and `jobs` keys)
    pub probably_workflow: bool,

    /// The content validates against the workflow schema
    pub valid_workflow: bool,
}

/// One observed change to one path at one commit
///
/// Field order is the column order of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub commit_hash: String,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub committed_date: i64,
    pub authored_date: i64,
    /// `None` for a deletion
    pub file_path: Option<String>,
    /// `None` for an addition
    pub previous_file_path: Option<String>,
    /// SHA-256 of the new content, `None` for a deletion
    pub file_hash: Option<String>,
    /// SHA-256 of the old content, `None` for an addition
    pub previous_file_hash: Option<String>,
    pub change_type: ChangeType,
    pub valid_yaml: bool,
    pub probably_workflow: bool,
    pub valid_workflow: bool,
}

impl Entry {
    /// Column names, in serialization order
    pub const COLUMNS: [&'static str; 15] = [
        "commit_hash",
        "author_name",
        "author_email",
        "committer_name",
        "committer_email",
        "committed_date",
        "authored_date",
        "file_path",
        "previous_file_path",
        "file_hash",
        "previous_file_hash",
        "change_type",
        "valid_yaml",
        "probably_workflow",
        "valid_workflow",
    ];

    /// Build an entry from the commit it belongs to and the change it records
    pub fn new(
        commit: &Commit,
        change_type: ChangeType,
        (file_path, previous_file_path): (Option<String>, Option<String>),
        (file_hash, previous_file_hash): (Option<String>, Option<String>),
        validity: Validity,
    ) -> Self {
        Self {
            commit_hash: commit.id.clone(),
            author_name: commit.author.name.clone(),
            author_email: commit.author.email.clone(),
            committer_name: commit.committer.name.clone(),
            committer_email: commit.committer.email.clone(),
            committed_date: commit.committed_at,
            authored_date: commit.authored_at,
            file_path,
            previous_file_path,
            file_hash,
            previous_file_hash,
            change_type,
            valid_yaml: validity.valid_yaml,
            probably_workflow: validity.probably_workflow,
            valid_workflow: validity.valid_workflow,
        }
    }

    /// The path this entry is about: the current path, or the removed one
    pub fn path(&self) -> &str {
        self.file_path
            .as_deref()
            .or(self.previous_file_path.as_deref())
            .unwrap_or_default()
    }

    /// Whether the path changed (rename folded into a modification)
    pub fn is_rename(&self) -> bool {
        matches!(
            (&self.file_path, &self.previous_file_path),
            (Some(current), Some(previous)) if current != previous
        )
    }
}
