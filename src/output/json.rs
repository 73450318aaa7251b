//! JSON Lines rendering
//!
//! One object per line, so appending to an existing file keeps it readable.

use std::io::{self, Write};

use serde::Serialize;

use super::EntryWriter;
use crate::model::Entry;

#[derive(Serialize)]
struct Row<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    #[serde(flatten)]
    entry: &'a Entry,
}

/// Writes entries as JSON objects, one per line
pub struct JsonWriter<W: Write> {
    out: W,
    repository: Option<String>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, repository: Option<String>) -> Self {
        Self { out, repository }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EntryWriter for JsonWriter<W> {
    /// Keys name every value; there is no header line
    fn write_header(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        let row = Row {
            repository: self.repository.as_deref(),
            entry,
        };
        serde_json::to_writer(&mut self.out, &row)?;
        self.out.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
