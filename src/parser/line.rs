//! Quote-aware CSV line tokenizer.

use csv::{ReaderBuilder, StringRecord, Terminator};

/// Split a single line into its fields.
///
/// Commas inside a quoted region are literal and `""` inside a quoted region
/// is an escaped quote. A quote in the middle of an unquoted field is kept
/// verbatim. Fields are not trimmed. An unterminated quote swallows the rest
/// of the line into the current field rather than failing.
pub fn split_line(line: &str) -> Vec<String> {
    // Line endings are stripped by the reader, so a stray `\r` is data
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .buffer_capacity(line.len().max(1))
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => vec![String::new()],
        Err(_) => vec![line.to_string()],
    }
}
