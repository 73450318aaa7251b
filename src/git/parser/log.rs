//! Log output parser (git log -z)

use super::super::GitError;
use super::super::format::{FIELD_SEPARATOR, LOG_FIELD_COUNT, RECORD_SEPARATOR};
use crate::model::{Commit, Signature};

use super::Parser;

impl Parser {
    /// Parse `git log -z` output into a list of Commits, newest first
    ///
    /// Records are NUL-separated; fields within a record are separated by
    /// `\x1f` (see `Formats::log`).
    pub fn parse_log(output: &str) -> Result<Vec<Commit>, GitError> {
        output
            .split(RECORD_SEPARATOR)
            .map(|record| record.trim_matches('\n'))
            .filter(|record| !record.is_empty())
            .map(Self::parse_log_record)
            .collect()
    }

    /// Parse a single log record
    pub(super) fn parse_log_record(record: &str) -> Result<Commit, GitError> {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();

        if fields.len() != LOG_FIELD_COUNT {
            return Err(GitError::ParseError(format!(
                "Expected {} fields, got {}: {:?}",
                LOG_FIELD_COUNT,
                fields.len(),
                fields
            )));
        }

        if fields[0].is_empty() {
            return Err(GitError::ParseError(format!(
                "Missing commit hash in record: {:?}",
                record
            )));
        }

        Ok(Commit {
            id: fields[0].to_string(),
            parents: fields[1].split_whitespace().map(str::to_string).collect(),
            author: Signature::new(fields[2], fields[3]),
            committer: Signature::new(fields[4], fields[5]),
            committed_at: Self::parse_timestamp(fields[6])?,
            authored_at: Self::parse_timestamp(fields[7])?,
        })
    }

    fn parse_timestamp(field: &str) -> Result<i64, GitError> {
        field
            .trim()
            .parse()
            .map_err(|_| GitError::ParseError(format!("Invalid timestamp: {:?}", field)))
    }
}
