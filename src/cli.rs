//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;
use std::path::PathBuf;

/// Default output filename, created next to the first input file
pub const DEFAULT_OUTPUT_FILE: &str = "merged_participants.csv";

/// kusss-merge - merge KUSSS participant CSV exports
///
/// Merges multiple course-participant CSV exports into one deduplicated,
/// sorted CSV, combining the course IDs of students enrolled in several
/// courses into a single row.
#[derive(Parser, Debug)]
#[command(
    name = "kusss-merge",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Merge KUSSS course-participant CSV exports into one deduplicated, sorted CSV",
    long_about = "Merges multiple KUSSS course-participant CSV exports into a single CSV. \
                  Students enrolled in more than one course appear once, with all of their \
                  course IDs collected into a sorted list. All input files must have the \
                  same columns in the same order.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  kusss-merge 365.101.csv 365.102.csv\n    \
                  kusss-merge exports/*.csv -o merged.csv\n    \
                  kusss-merge a.csv b.csv --course-ids 365.101 365.102\n    \
                  kusss-merge a.csv b.csv -m Matrikelnummer -c Nachname Vorname\n    \
                  kusss-merge a.csv b.csv -e utf-8 -s ','"
)]
pub struct Cli {
    /// KUSSS participants CSV export files. Filenames must contain the course
    /// ID (e.g., 365.123 or 365123) unless --course-ids is given
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Explicit course IDs, one per input file, in the same order as FILE...
    /// Takes precedence over filename extraction
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub course_ids: Vec<String>,

    /// Columns used to match rows across files
    #[arg(
        long,
        short = 'm',
        value_name = "COLUMN",
        num_args = 1..,
        default_value = "Matrikelnummer"
    )]
    pub merge_cols: Vec<String>,

    /// Columns used to sort the output
    #[arg(
        long,
        short = 'c',
        value_name = "COLUMN",
        num_args = 1..,
        default_value = "Matrikelnummer"
    )]
    pub sort_cols: Vec<String>,

    /// Character encoding of the input files ('ansi' means windows-1252)
    #[arg(long, short = 'e', value_name = "ENCODING", default_value = "ansi")]
    pub encoding: String,

    /// Field separator of the input files
    #[arg(long, short = 's', value_name = "CHAR", default_value = ";")]
    pub separator: String,

    /// Output CSV path (UTF-8, comma-separated). Defaults to
    /// merged_participants.csv next to the first input file
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Output path: explicit argument, or the default file next to the first input
    pub fn output_path(&self) -> PathBuf {
        match &self.output_file {
            Some(path) => path.clone(),
            None => {
                let dir = self
                    .files
                    .first()
                    .and_then(|f| f.parent())
                    .unwrap_or_else(|| std::path::Path::new(""));
                dir.join(DEFAULT_OUTPUT_FILE)
            }
        }
    }
}
