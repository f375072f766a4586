//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Definitions used across the integration tests
pub const GREET_DEFINITIONS: &str = r#"
commands:
  greet:
    description: Greet someone
    usage: "[options] <extra>..."
    options:
      - name: name
        short: n
        required: true
        description: Who to greet
      - name: times
        short: t
        type: int
        default: 1
        description: How many greetings
      - name: loud
        type: bool
"#;

/// Create a temporary directory with a cmdkit.yml file
pub fn create_definitions(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cmdkit.yml");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Create definitions in a directory and return a nested subdirectory
pub fn create_definitions_in_parent(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cmdkit.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, path, sub_dir)
}

/// An empty scratch directory with no definitions file
pub fn empty_dir() -> TempDir {
    TempDir::new().unwrap()
}
