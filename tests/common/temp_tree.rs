//! Temporary directory tree for merge fixtures

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that cleans up on drop
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Root of the tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `name` inside the tree
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name`, creating parent directories
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Read `name` as a string
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.join(name)).expect("read file")
    }
}
