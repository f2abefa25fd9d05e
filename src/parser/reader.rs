//! Streaming CSV file reader.
//!
//! Reads a profile file one line at a time, takes the first non-blank line
//! as the header and hands each following non-blank line to a callback as a
//! [`RawRow`] keyed by header name.

use super::line::split_line;
use crate::error::{ArgoError, Result};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One data line zipped with the file's header names
#[derive(Debug, Clone)]
pub struct RawRow {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl RawRow {
    /// Zip values positionally with header names.
    ///
    /// Missing trailing values become empty strings; surplus values are dropped.
    pub fn new(header: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self { header, values }
    }

    /// Value of the column with exactly this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }

    /// Values of every column whose name matches ignoring case, in header order
    pub fn values_ignore_case<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.columns()
            .filter(move |(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Column name and value pairs in header order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Stream `path` and call `on_row` once per data row.
///
/// Blank lines are skipped everywhere, including before the header. Bytes
/// that are not valid UTF-8 are replaced with U+FFFD rather than failing the
/// file. Returns the number of rows emitted. Any I/O fault is reported as
/// [`ArgoError::FileRead`]; rows already emitted are not retracted.
pub async fn read_rows<F>(path: &Path, mut on_row: F) -> Result<usize>
where
    F: FnMut(RawRow),
{
    let file_read_error = |source| ArgoError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(file_read_error)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();

    let mut header: Option<Arc<[String]>> = None;
    let mut rows = 0usize;
    let mut lossy_lines = 0usize;

    loop {
        buffer.clear();
        if reader
            .read_until(b'\n', &mut buffer)
            .await
            .map_err(file_read_error)?
            == 0
        {
            break;
        }

        let decoded = String::from_utf8_lossy(&buffer);
        if matches!(decoded, Cow::Owned(_)) {
            lossy_lines += 1;
        }

        let line = decoded.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        match &header {
            Some(names) => {
                on_row(RawRow::new(Arc::clone(names), split_line(line)));
                rows += 1;
            }
            None => header = Some(parse_header(line)),
        }
    }

    if lossy_lines > 0 {
        warn!(
            "{} lines of {} were not valid UTF-8 and were decoded lossily",
            lossy_lines,
            path.display()
        );
    }

    debug!("Read {} rows from {}", rows, path.display());
    Ok(rows)
}

fn parse_header(line: &str) -> Arc<[String]> {
    split_line(line.trim_start_matches(BYTE_ORDER_MARK))
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect::<Vec<_>>()
        .into()
}
