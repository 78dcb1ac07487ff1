//! Extension and size filtering of walked entries.

use serde::{Deserialize, Serialize};

use flatdir_core::{DirectoryEntry, FlattenConfig};

/// Why a file was left out of the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Smaller than the minimum size.
    TooSmall,
    /// Larger than the maximum size.
    TooLarge,
    /// Name does not end with the extension filter.
    ExtensionMismatch,
    /// Lives inside the output directory itself.
    InsideOutput,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall => write!(f, "below minimum size"),
            Self::TooLarge => write!(f, "above maximum size"),
            Self::ExtensionMismatch => write!(f, "extension does not match"),
            Self::InsideOutput => write!(f, "inside output directory"),
        }
    }
}

/// Size range and name suffix a file must satisfy to be linked.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    min_size: u64,
    max_size: Option<u64>,
    suffix: String,
}

impl EntryFilter {
    /// Build the filter described by a flatten config.
    pub fn from_config(config: &FlattenConfig) -> Self {
        Self {
            min_size: config.min_bytes(),
            max_size: config.max_bytes(),
            suffix: config.extension.clone(),
        }
    }

    /// Check a file entry. Returns `None` if it should be linked.
    ///
    /// Both size bounds are inclusive. The extension is a plain
    /// case-insensitive suffix test on the whole base name.
    pub fn check(&self, entry: &DirectoryEntry) -> Option<SkipReason> {
        let size = entry.size().unwrap_or(0);
        if size < self.min_size {
            return Some(SkipReason::TooSmall);
        }
        if self.max_size.is_some_and(|max| size > max) {
            return Some(SkipReason::TooLarge);
        }
        if !entry.name_ends_with_ignore_case(&self.suffix) {
            return Some(SkipReason::ExtensionMismatch);
        }
        None
    }
}
