//! Dataset serialization
//!
//! Entries are written as CSV rows or JSON lines, optionally prefixed with
//! the repository they come from.

pub mod csv;
pub mod json;

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::model::Entry;

pub use csv::{CsvError, CsvWriter};
pub use json::JsonWriter;

/// Serialization format of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

/// Sink for dataset entries
pub trait EntryWriter {
    fn write_header(&mut self) -> io::Result<()>;
    fn write_entry(&mut self, entry: &Entry) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    fn write_all(&mut self, entries: &[Entry]) -> io::Result<()> {
        for entry in entries {
            self.write_entry(entry)?;
        }
        Ok(())
    }
}

/// Wrap `out` in a writer for `format`
pub fn writer<'a, W: Write + 'a>(
    out: W,
    format: Format,
    repository: Option<String>,
) -> Box<dyn EntryWriter + 'a> {
    match format {
        Format::Csv => Box::new(CsvWriter::new(out, repository)),
        Format::Json => Box::new(JsonWriter::new(out, repository)),
    }
}

/// Open `path` for appending and return a writer for it
///
/// The header is written only when `headers` is set and the file is new
/// or empty, so repeated runs keep a single header line.
pub fn append_to(
    path: &Path,
    format: Format,
    repository: Option<String>,
    headers: bool,
) -> io::Result<Box<dyn EntryWriter>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let empty = file.metadata()?.len() == 0;

    let mut writer = writer(BufWriter::new(file), format, repository);
    if headers && empty {
        writer.write_header()?;
    }
    Ok(writer)
}

/// A writer on standard output
pub fn to_stdout(
    format: Format,
    repository: Option<String>,
    headers: bool,
) -> io::Result<Box<dyn EntryWriter>> {
    let mut writer = writer(io::stdout().lock(), format, repository);
    if headers {
        writer.write_header()?;
    }
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, Commit, Validity};
    use std::fs;
    use tempfile::TempDir;

    fn entry() -> Entry {
        Entry::new(
            &Commit::default(),
            ChangeType::Added,
            (Some("a.yml".to_string()), None),
            (Some("h".to_string()), None),
            Validity::default(),
        )
    }

    fn append(path: &Path, headers: bool) {
        let mut writer = append_to(path, Format::Csv, None, headers).unwrap();
        writer.write_all(&[entry()]).unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        append(&path, true);
        append(&path, true);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("commit_hash,"));
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_append_without_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        append(&path, false);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("commit_hash"));
    }
}
