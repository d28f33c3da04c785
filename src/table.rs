//! In-memory tabular data model
//!
//! Rows are ordered sequences of text cells, positionally aligned with the
//! table's column names. All values stay text, including numeric-looking
//! identifiers, so leading zeros and large matriculation numbers survive
//! untouched.
//!
//! The one special column is [`COURSE_ID_COL`]: every table is tagged with a
//! single course identifier at load time, and merging collapses the tags of a
//! student's multiple enrollments into a sorted list. A cell is therefore
//! either a scalar or a list of course IDs, and list cells serialize in a
//! bracketed, single-quoted form (`['365.101', '365.102']`) that downstream
//! consumers can parse back.

use crate::error::{MergeError, Result};

/// Name of the synthetic column carrying the course identifier(s)
pub const COURSE_ID_COL: &str = "course_id";

/// A single cell value
///
/// `List` only ever appears in the `course_id` column of a collapsed row;
/// every other cell, and the `course_id` of a single-enrollment row, stays
/// `Scalar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Scalar(String),
    List(Vec<String>),
}

impl Cell {
    /// Serialized form written to the output CSV and used for sorting
    pub fn to_field(&self) -> String {
        match self {
            Cell::Scalar(value) => value.clone(),
            Cell::List(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }

    /// Parse a serialized field back into a cell
    ///
    /// Inverse of [`Cell::to_field`] for values that do not themselves contain
    /// single quotes, which course IDs never do.
    pub fn parse_field(field: &str) -> Cell {
        if let Some(inner) = field
            .strip_prefix("['")
            .and_then(|rest| rest.strip_suffix("']"))
        {
            Cell::List(inner.split("', '").map(str::to_string).collect())
        } else {
            Cell::Scalar(field.to_string())
        }
    }
}

/// A single table row, one cell per column
pub type Row = Vec<Cell>;

/// An ordered collection of rows sharing one column schema
///
/// `source` is a display name for where the rows came from (the input file
/// path), used in error messages only.
#[derive(Debug, Clone)]
pub struct Table {
    pub source: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(source: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a named column, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve a list of column names to indices
    pub fn column_indices(&self, names: &[String], role: &str) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| MergeError::MissingColumn {
                    column: name.clone(),
                    role: role.to_string(),
                })
            })
            .collect()
    }

    /// Tag every row with a course identifier
    ///
    /// Overwrites an existing `course_id` column in place; appends one as the
    /// last column otherwise.
    pub fn set_course_id(&mut self, course_id: &str) {
        match self.column_index(COURSE_ID_COL) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = Cell::Scalar(course_id.to_string());
                }
            }
            None => {
                self.columns.push(COURSE_ID_COL.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Scalar(course_id.to_string()));
                }
            }
        }
    }
}
