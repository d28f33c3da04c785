//! Common test utilities for kusss-merge integration tests

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn kusss_merge_cmd() -> Command {
    Command::cargo_bin("kusss-merge").unwrap()
}

/// Write a semicolon-separated export with the default two-column schema
#[allow(dead_code)]
pub fn write_export(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    write_export_with_header(dir, name, "Matrikelnummer;Name", rows)
}

#[allow(dead_code)]
pub fn write_export_with_header(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = format!("{header}\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}
