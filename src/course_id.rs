//! Course-ID resolution
//!
//! Every input file must be matched to its course. IDs are either passed
//! explicitly (same order as the files, explicit list wins) or extracted from
//! the file's base name, where KUSSS exports carry the course ID as six
//! digits (`365123`) or dotted (`365.123`).

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{MergeError, Result};

/// Matches course IDs like `365123` or `365.123`
#[allow(clippy::expect_used)]
fn course_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{6}|\d{3}\.\d{3}").expect("hardcoded pattern"))
}

/// Resolve one course ID per input file
///
/// An explicit `course_ids` list takes precedence over filename extraction
/// and must have exactly one entry per file.
pub fn resolve(files: &[PathBuf], course_ids: &[String]) -> Result<Vec<String>> {
    if !course_ids.is_empty() {
        if course_ids.len() != files.len() {
            return Err(MergeError::CourseIdCountMismatch {
                files: files.len(),
                ids: course_ids.len(),
            });
        }
        return Ok(course_ids.to_vec());
    }

    files.iter().map(|file| extract(file)).collect()
}

/// Extract a course ID from the file's base name
pub fn extract(file: &Path) -> Result<String> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    course_id_pattern()
        .find(&name)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| MergeError::CourseIdNotFound {
            file: file.display().to_string(),
        })
}
