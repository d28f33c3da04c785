//! CSV input loading
//!
//! KUSSS exports are semicolon-separated and usually windows-1252 encoded,
//! so files are read as raw bytes, decoded with a configurable encoding, and
//! only then parsed. Every cell is kept as text; no type inference, so
//! matriculation numbers keep their leading zeros.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{MergeError, Result};
use crate::table::{Cell, Table};

/// Resolve an encoding label to an encoding
///
/// `ansi` is what KUSSS (and Windows tooling in general) calls windows-1252;
/// everything else goes through WHATWG label resolution.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    if label.eq_ignore_ascii_case("ansi") {
        return Ok(WINDOWS_1252);
    }
    Encoding::for_label(label.as_bytes()).ok_or_else(|| MergeError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Validate the separator argument as a single-byte CSV delimiter
pub fn parse_separator(separator: &str) -> Result<u8> {
    match separator.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(MergeError::InvalidSeparator {
            separator: separator.to_string(),
        }),
    }
}

/// Load one participant CSV file and tag it with its course ID
pub fn load_table(
    path: &Path,
    encoding: &'static Encoding,
    delimiter: u8,
    course_id: &str,
) -> Result<Table> {
    let bytes = fs::read(path).map_err(|e| MergeError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let (decoded, _, _) = encoding.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(decoded.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| MergeError::CsvParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = Table::new(path.display().to_string(), columns);
    for record in reader.records() {
        let record = record.map_err(|e| MergeError::CsvParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        table
            .rows
            .push(record.iter().map(|field| Cell::Scalar(field.to_string())).collect());
    }

    table.set_course_id(course_id);
    Ok(table)
}
