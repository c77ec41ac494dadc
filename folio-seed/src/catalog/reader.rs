//! Raw record reader for delimited catalog exports
//!
//! Two grammars are supported, selected explicitly by [`SourceFormat`]:
//!
//! - **Pipe**: fields split on `|`, no quoting. A row needs at least as many
//!   fields as the header; shorter rows are dropped.
//! - **Comma**: fields split on `,` outside double quotes. A `"` always
//!   toggles quoted mode; `""` is not an escape sequence.
//!
//! Rows without a non-blank `title` and `authors` are dropped during parsing.

use crate::error::{SeedError, SeedResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Delimited text grammar of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `|`-delimited, unquoted
    Pipe,
    /// `,`-delimited with double-quote grouping
    Comma,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pipe => "pipe",
            SourceFormat::Comma => "comma",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pipe" | "|" => Ok(SourceFormat::Pipe),
            "comma" | "," | "csv" => Ok(SourceFormat::Comma),
            other => Err(SeedError::Config(format!(
                "Unknown source format '{}' (expected \"pipe\" or \"comma\")",
                other
            ))),
        }
    }
}

/// One unvalidated row: column name → value
///
/// Columns not present in the source read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Column value, or `""` when absent
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.get("title")
    }

    pub fn authors(&self) -> &str {
        self.get("authors")
    }

    pub fn cover_url(&self) -> &str {
        self.get("cover_url")
    }

    pub fn description(&self) -> &str {
        self.get("description")
    }

    pub fn tags(&self) -> &str {
        self.get("tags")
    }

    pub fn isbn(&self) -> &str {
        self.get("isbn")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Both required columns carry non-blank text
    fn has_identity(&self) -> bool {
        !self.title().trim().is_empty() && !self.authors().trim().is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Parse full file content into records, in input order
pub fn parse_records(content: &str, format: SourceFormat) -> Vec<RawRecord> {
    let lines: Vec<&str> = content.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let delimiter = match format {
        SourceFormat::Pipe => '|',
        SourceFormat::Comma => ',',
    };
    let headers: Vec<&str> = lines[0].split(delimiter).map(str::trim).collect();

    let mut records = Vec::with_capacity(lines.len() - 1);
    let mut skipped = 0usize;

    for line in &lines[1..] {
        let parsed = match format {
            SourceFormat::Pipe => parse_pipe_line(line, &headers),
            SourceFormat::Comma => Some(parse_comma_line(line, &headers)),
        };

        match parsed {
            Some(record) if record.has_identity() => records.push(record),
            _ => skipped += 1,
        }
    }

    debug!(
        format = %format,
        kept = records.len(),
        skipped,
        "Parsed delimited records"
    );

    records
}

/// Read and parse a file
///
/// A missing or unreadable file is a [`SeedError::Source`], never an empty
/// result.
pub fn read_records(path: &Path, format: SourceFormat) -> SeedResult<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Source {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_records(&content, format))
}

fn parse_pipe_line(line: &str, headers: &[&str]) -> Option<RawRecord> {
    let values: Vec<&str> = line.split('|').map(str::trim).collect();
    if values.len() < headers.len() {
        return None;
    }

    Some(
        headers
            .iter()
            .zip(values)
            .map(|(header, value)| (*header, value))
            .collect(),
    )
}

fn parse_comma_line(line: &str, headers: &[&str]) -> RawRecord {
    // Fields past the header count have no column name and are dropped
    headers
        .iter()
        .zip(split_comma_fields(line))
        .map(|(header, value)| (*header, value))
        .collect()
}

/// Split one comma-grammar line into trimmed field values
///
/// Character scan: `"` toggles quoted mode, `,` outside quotes ends a field,
/// the last field is flushed at end of line.
pub fn split_comma_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
