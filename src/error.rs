//! Error types and handling for kusss-merge
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for kusss-merge operations
#[derive(Error, Diagnostic, Debug)]
pub enum MergeError {
    // Configuration errors
    #[error("Column '{column}' not found in the input files (used as {role} column)")]
    #[diagnostic(
        code(kusss_merge::config::missing_column),
        help("Check --merge-cols/--sort-cols against the header row of the CSV files")
    )]
    MissingColumn { column: String, role: String },

    #[error("Unknown character encoding: {label}")]
    #[diagnostic(
        code(kusss_merge::config::unknown_encoding),
        help("Use 'ansi' for windows-1252 KUSSS exports, or any WHATWG encoding label such as 'utf-8' or 'iso-8859-1'")
    )]
    UnknownEncoding { label: String },

    #[error("Separator must be a single byte, got '{separator}'")]
    #[diagnostic(code(kusss_merge::config::invalid_separator))]
    InvalidSeparator { separator: String },

    #[error("No input tables to merge")]
    #[diagnostic(code(kusss_merge::config::no_input))]
    NoInputTables,

    // Course-ID resolution errors
    #[error("File '{file}' does not contain a valid course ID")]
    #[diagnostic(
        code(kusss_merge::course_id::not_found),
        help("Filenames must contain a course ID such as 365.123 or 365123, or pass --course-ids explicitly")
    )]
    CourseIdNotFound { file: String },

    #[error("Got {files} input files but {ids} course IDs")]
    #[diagnostic(
        code(kusss_merge::course_id::count_mismatch),
        help("--course-ids must list exactly one ID per input file, in the same order")
    )]
    CourseIdCountMismatch { files: usize, ids: usize },

    // Input schema errors
    #[error("File '{file}' has columns [{found}], expected [{expected}]")]
    #[diagnostic(
        code(kusss_merge::schema::mismatch),
        help("All input CSV files must have the same columns in the same order")
    )]
    SchemaMismatch {
        file: String,
        expected: String,
        found: String,
    },

    // Invariant violations (internal defects, never recovered)
    #[error("Duplicate merge key [{key}] left after merging")]
    #[diagnostic(
        code(kusss_merge::merge::duplicate_after_merge),
        help("This is a bug in kusss-merge, please report it")
    )]
    DuplicateAfterMerge { key: String },

    // File system errors
    #[error("Failed to read file '{path}': {reason}")]
    #[diagnostic(code(kusss_merge::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    #[diagnostic(code(kusss_merge::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to parse CSV file '{path}': {reason}")]
    #[diagnostic(code(kusss_merge::csv::parse_failed))]
    CsvParseFailed { path: String, reason: String },
}

/// Convenience result type for kusss-merge operations
pub type Result<T> = std::result::Result<T, MergeError>;
