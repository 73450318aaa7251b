//! CSV rendering and reading
//!
//! Fields containing a comma, a quote or a line break are quoted, with
//! quotes doubled. Records end with `\n`. Booleans are `True`/`False`.

use std::io::{self, Write};

use thiserror::Error;

use super::EntryWriter;
use crate::model::Entry;

/// Name of the optional leading column
pub const REPOSITORY_COLUMN: &str = "repository";

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),

    #[error("Unexpected character after closing quote on line {0}")]
    TrailingCharacter(usize),
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

/// Write one record
pub fn write_record<W, I, S>(out: &mut W, fields: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        let field = field.as_ref();
        if needs_quotes(field) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\n")
}

fn boolean(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// Values of an entry in column order, empty for absent values
pub fn entry_fields(entry: &Entry) -> [String; 15] {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        entry.commit_hash.clone(),
        entry.author_name.clone(),
        entry.author_email.clone(),
        entry.committer_name.clone(),
        entry.committer_email.clone(),
        entry.committed_date.to_string(),
        entry.authored_date.to_string(),
        optional(&entry.file_path),
        optional(&entry.previous_file_path),
        optional(&entry.file_hash),
        optional(&entry.previous_file_hash),
        entry.change_type.to_string(),
        boolean(entry.valid_yaml),
        boolean(entry.probably_workflow),
        boolean(entry.valid_workflow),
    ]
}

/// Writes entries as CSV rows
pub struct CsvWriter<W: Write> {
    out: W,
    repository: Option<String>,
}

impl<W: Write> CsvWriter<W> {
    /// `repository`, when set, fills a leading `repository` column
    pub fn new(out: W, repository: Option<String>) -> Self {
        Self { out, repository }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EntryWriter for CsvWriter<W> {
    fn write_header(&mut self) -> io::Result<()> {
        let repository = self.repository.as_ref().map(|_| REPOSITORY_COLUMN);
        write_record(
            &mut self.out,
            repository.into_iter().chain(Entry::COLUMNS),
        )
    }

    fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        let fields = entry_fields(entry);
        match &self.repository {
            Some(repository) => write_record(
                &mut self.out,
                std::iter::once(repository.as_str()).chain(fields.iter().map(String::as_str)),
            ),
            None => write_record(&mut self.out, &fields),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Split CSV text into records
///
/// Accepts `\n` and `\r\n` terminators and quoted fields spanning lines.
/// Blank lines and a trailing terminator do not produce records.
pub fn read_records(input: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    let mut at_record_start = true;

    while let Some(c) = chars.next() {
        match c {
            '"' if field.is_empty() => {
                let start = line;
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            field.push('"');
                        }
                        Some('"') => break,
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            field.push(c);
                        }
                        None => return Err(CsvError::UnterminatedQuote(start)),
                    }
                }
                if !matches!(chars.peek(), None | Some(',') | Some('\n') | Some('\r')) {
                    return Err(CsvError::TrailingCharacter(line));
                }
                at_record_start = false;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                at_record_start = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            // blank lines hold no record
            '\n' if at_record_start => line += 1,
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                line += 1;
                at_record_start = true;
            }
            c => {
                field.push(c);
                at_record_start = false;
            }
        }
    }

    if !at_record_start {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
