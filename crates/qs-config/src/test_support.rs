//! A temporary directory tree for discovery tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// Directories and `.qs.toml` files under a temporary root.
pub struct ConfigTree {
    root: TempDir,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Returns `rel` under the root, creating it. An empty `rel` is the root itself.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.qs.toml` with `contents` into `rel` and returns the file path.
    pub fn config(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }
}
