//! Commit data model

/// Identity recorded on a commit (author or committer)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A commit on the first-parent lineage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    /// Full commit hash
    pub id: String,

    /// Parent hashes, first parent first (empty for a root commit)
    pub parents: Vec<String>,

    pub author: Signature,

    pub committer: Signature,

    /// Committer timestamp (Unix seconds)
    pub committed_at: i64,

    /// Author timestamp (Unix seconds)
    pub authored_at: i64,
}

impl Commit {
    /// The parent the commit is diffed against
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// A commit without parents has nothing to diff against but the empty tree
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Abbreviated hash for log messages
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_commit() -> Commit {
        Commit {
            id: "0123456789abcdef0123456789abcdef01234567".to_string(),
            parents: vec![
                "1111111111111111111111111111111111111111".to_string(),
                "2222222222222222222222222222222222222222".to_string(),
            ],
            author: Signature::new("Alice", "alice@example.com"),
            committer: Signature::new("Bob", "bob@example.com"),
            committed_at: 1_700_000_100,
            authored_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_first_parent_of_merge() {
        let commit = sample_commit();
        assert_eq!(
            commit.first_parent(),
            Some("1111111111111111111111111111111111111111")
        );
        assert!(!commit.is_root());
    }

    #[test]
    fn test_root_commit() {
        let root = Commit {
            parents: vec![],
            ..sample_commit()
        };
        assert!(root.is_root());
        assert_eq!(root.first_parent(), None);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(sample_commit().short_id(), "01234567");

        let tiny = Commit {
            id: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(tiny.short_id(), "abc");
    }
}
