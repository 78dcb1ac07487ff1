//! Directory entry type produced by the tree walker.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single file or directory encountered while walking a tree.
///
/// Files always carry a size; directories never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: CompactString,
    size: Option<u64>,
}

impl DirectoryEntry {
    /// Create an entry for a file of `size` bytes.
    pub fn file(path: impl Into<PathBuf>, name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size: Some(size),
        }
    }

    /// Create an entry for a directory.
    pub fn directory(path: impl Into<PathBuf>, name: impl Into<CompactString>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size: None,
        }
    }

    /// Full path, rooted at the directory the walk started from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes, `None` for directories.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn is_dir(&self) -> bool {
        self.size.is_none()
    }

    pub fn is_file(&self) -> bool {
        self.size.is_some()
    }

    /// Case-insensitive suffix match on the base name.
    ///
    /// This is a plain suffix test, so `"txt"` matches both `notes.txt` and
    /// `notestxt`. An empty suffix matches everything.
    pub fn name_ends_with_ignore_case(&self, suffix: &str) -> bool {
        self.name.to_lowercase().ends_with(&suffix.to_lowercase())
    }
}
