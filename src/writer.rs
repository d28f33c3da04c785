//! CSV output writing
//!
//! The merged table is written UTF-8 encoded and comma-separated with a
//! header row, independent of the input encoding and separator. Collapsed
//! `course_id` cells serialize in the bracketed list form of
//! [`Cell::to_field`](crate::table::Cell::to_field); the comma inside makes
//! the csv writer quote the field, so the file stays parseable.

use std::path::Path;

use crate::error::{MergeError, Result};
use crate::table::Table;

/// Write the merged table to `path`
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let to_write_err = |e: csv::Error| MergeError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_write_err)?;

    writer.write_record(&table.columns).map_err(to_write_err)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_field()))
            .map_err(to_write_err)?;
    }

    writer.flush().map_err(|e| MergeError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
