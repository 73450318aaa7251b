//! Persistent file identifiers
//!
//! A dataset lists changes newest first. Replaying it from the oldest row,
//! every file gets an identifier when it is added, keeps it through
//! modifications and renames, and releases it when deleted.

use std::collections::HashMap;
use std::fmt;
use std::io;

use thiserror::Error;

use crate::output::csv::{CsvError, REPOSITORY_COLUMN, read_records, write_record};

/// Name of the column appended to the dataset
pub const UID_COLUMN: &str = "uid";

/// A file within a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub repository: Option<String>,
    pub path: String,
}

impl FileKey {
    fn new(repository: Option<&str>, path: &str) -> Self {
        Self {
            repository: repository.map(str::to_string),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repository {
            Some(repository) => write!(f, "({}, {})", repository, self.path),
            None => write!(f, "({})", self.path),
        }
    }
}

#[derive(Error, Debug)]
pub enum UidError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Key {key} does not exist (commit: {commit})")]
    UnknownKey { key: FileKey, commit: String },

    #[error("Key {key} already exists (commit: {commit})")]
    DuplicateKey { key: FileKey, commit: String },
}

/// The fields of a dataset row the stitching looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct Change<'a> {
    pub repository: Option<&'a str>,
    pub commit: &'a str,
    pub file_path: Option<&'a str>,
    pub previous_file_path: Option<&'a str>,
    pub file_hash: Option<&'a str>,
    pub previous_file_hash: Option<&'a str>,
}

/// Identifiers of the files alive at the current point of the replay
#[derive(Debug, Default)]
pub struct UidAssigner {
    live: HashMap<FileKey, String>,
}

impl UidAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the file a change applies to
    ///
    /// Changes must be fed oldest first.
    pub fn assign(&mut self, change: &Change<'_>) -> Result<String, UidError> {
        let key = FileKey::new(change.repository, change.file_path.unwrap_or_default());
        let previous_key = FileKey::new(
            change.repository,
            change.previous_file_path.unwrap_or_default(),
        );
        let unknown = |key: FileKey| UidError::UnknownKey {
            key,
            commit: change.commit.to_string(),
        };
        let duplicate = |key: FileKey| UidError::DuplicateKey {
            key,
            commit: change.commit.to_string(),
        };

        if change.file_hash.is_none() {
            return self.live.remove(&previous_key).ok_or_else(|| unknown(previous_key));
        }

        if change.previous_file_hash.is_none() {
            if self.live.contains_key(&key) {
                return Err(duplicate(key));
            }
            let uid = match change.repository {
                Some(repository) => format!("{}/{}/{}", repository, key.path, change.commit),
                None => format!("{}/{}", key.path, change.commit),
            };
            self.live.insert(key, uid.clone());
            return Ok(uid);
        }

        if key != previous_key {
            if self.live.contains_key(&key) {
                return Err(duplicate(key));
            }
            let uid = self
                .live
                .remove(&previous_key)
                .ok_or_else(|| unknown(previous_key))?;
            self.live.insert(key, uid.clone());
            return Ok(uid);
        }

        self.live.get(&key).cloned().ok_or_else(|| unknown(key))
    }

    /// Files currently alive
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

struct Columns {
    repository: Option<usize>,
    commit: usize,
    file_path: usize,
    previous_file_path: usize,
    file_hash: usize,
    previous_file_hash: usize,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, UidError> {
        let find = |name: &'static str| header.iter().position(|column| column == name);
        let require = |name: &'static str| find(name).ok_or(UidError::MissingColumn(name));
        Ok(Self {
            repository: find(REPOSITORY_COLUMN),
            commit: require("commit_hash")?,
            file_path: require("file_path")?,
            previous_file_path: require("previous_file_path")?,
            file_hash: require("file_hash")?,
            previous_file_hash: require("previous_file_hash")?,
        })
    }

    fn change<'a>(&self, record: &'a [String]) -> Change<'a> {
        let optional =
            |index: usize| Some(record[index].as_str()).filter(|value| !value.is_empty());
        Change {
            repository: self.repository.map(|index| record[index].as_str()),
            commit: &record[self.commit],
            file_path: optional(self.file_path),
            previous_file_path: optional(self.previous_file_path),
            file_hash: optional(self.file_hash),
            previous_file_hash: optional(self.previous_file_hash),
        }
    }
}

/// Add a `uid` column to a CSV dataset with headers
///
/// Rows keep their order; identifiers are computed from the last row up.
pub fn stitch(input: &str) -> Result<String, UidError> {
    let mut records = read_records(input)?.into_iter();
    let Some(header) = records.next() else {
        return Ok(String::new());
    };
    let columns = Columns::locate(&header)?;
    let rows: Vec<Vec<String>> = records.collect();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(UidError::RaggedRow {
                row: i + 1,
                found: row.len(),
                expected: header.len(),
            });
        }
    }

    let mut assigner = UidAssigner::new();
    let mut uids = rows
        .iter()
        .rev()
        .map(|row| assigner.assign(&columns.change(row)))
        .collect::<Result<Vec<_>, _>>()?;
    uids.reverse();

    let mut out = Vec::new();
    let header_line = header.iter().map(String::as_str).chain([UID_COLUMN]);
    write_record(&mut out, header_line)?;
    for (row, uid) in rows.iter().zip(&uids) {
        write_record(&mut out, row.iter().chain([uid]))?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}
