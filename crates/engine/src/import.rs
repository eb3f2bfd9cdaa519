//! The `@import` loader seam.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Imports deeper than this are dropped as unsupported rather than
/// followed, which also bounds import cycles.
pub const MAX_IMPORT_DEPTH: usize = 32;

/// Fetches the source text behind an `@import` target. An unreadable
/// target returns `None` and the import is skipped.
pub trait ImportLoader {
    fn load(&self, path: &Path) -> Option<String>;
}

/// Production loader: eager filesystem reads.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl ImportLoader for FsLoader {
    fn load(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

/// In-memory loader for tests and embedded use.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file under the given path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl ImportLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }
}
