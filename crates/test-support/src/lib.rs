//! Helpers shared by the test suites of the workspace crates.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A SQLite database file inside a private temporary directory. The directory
/// and the file are removed when the value is dropped.
pub struct TempDatabase {
    dir: TempDir,
    file: PathBuf,
}

impl TempDatabase {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("tasks-test-")
            .tempdir()
            .unwrap_or_else(|err| panic!("failed to create temp dir: {err}"));
        let file = dir.path().join("tasks.db");
        Self { dir, file }
    }

    /// Connection URL that creates the file on first connect.
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.file.to_string_lossy())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}
