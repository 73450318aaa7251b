//! Raw diff output parser (git diff-tree -r -z --raw)

use super::super::GitError;
use super::super::format::RECORD_SEPARATOR;
use crate::model::{DiffEntry, DiffSide};

use super::Parser;

/// Mode printed for the missing side of a creation or deletion
const ABSENT_MODE: &str = "000000";

impl Parser {
    /// Parse `git diff-tree -r -z --raw` output into diff entries
    ///
    /// Format (NUL-separated tokens):
    /// ```text
    /// :100644 100644 <old-id> <new-id> M\0path\0
    /// :100644 100644 <old-id> <new-id> R095\0old path\0new path\0
    /// ```
    pub fn parse_raw_diff(output: &str) -> Result<Vec<DiffEntry>, GitError> {
        let mut entries = Vec::new();
        let mut tokens = output
            .split(RECORD_SEPARATOR)
            .filter(|token| !token.is_empty());

        while let Some(meta) = tokens.next() {
            let header = Self::parse_raw_header(meta)?;

            let first_path = tokens.next().ok_or_else(|| {
                GitError::ParseError(format!("Missing path after diff header: {:?}", meta))
            })?;

            // Renames and copies carry a source and a destination path
            let second_path = if header.status.starts_with(['R', 'C']) {
                Some(tokens.next().ok_or_else(|| {
                    GitError::ParseError(format!(
                        "Missing destination path after diff header: {:?}",
                        meta
                    ))
                })?)
            } else {
                None
            };

            let old_path = first_path;
            let new_path = second_path.unwrap_or(first_path);

            entries.push(DiffEntry {
                old: (header.old_mode != ABSENT_MODE)
                    .then(|| DiffSide::new(old_path, header.old_blob, header.old_mode)),
                new: (header.new_mode != ABSENT_MODE)
                    .then(|| DiffSide::new(new_path, header.new_blob, header.new_mode)),
                status: header.status.to_string(),
            });
        }

        Ok(entries)
    }

    /// Parse `:<old-mode> <new-mode> <old-id> <new-id> <status>`
    fn parse_raw_header(meta: &str) -> Result<RawHeader<'_>, GitError> {
        let body = meta.strip_prefix(':').ok_or_else(|| {
            GitError::ParseError(format!("Expected diff header, got: {:?}", meta))
        })?;

        let fields: Vec<&str> = body.split(' ').collect();
        if fields.len() != 5 {
            return Err(GitError::ParseError(format!(
                "Expected 5 fields in diff header, got {}: {:?}",
                fields.len(),
                meta
            )));
        }

        Ok(RawHeader {
            old_mode: fields[0],
            new_mode: fields[1],
            old_blob: fields[2],
            new_blob: fields[3],
            status: fields[4],
        })
    }
}

struct RawHeader<'a> {
    old_mode: &'a str,
    new_mode: &'a str,
    old_blob: &'a str,
    new_blob: &'a str,
    status: &'a str,
}
