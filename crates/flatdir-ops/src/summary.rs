//! Counters describing a finished flatten run.

use serde::{Deserialize, Serialize};

use crate::filter::SkipReason;

/// What a successful flatten run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenSummary {
    /// Directories encountered (and descended into).
    pub directories: usize,
    /// Hardlinks created.
    pub linked: usize,
    /// Total size of the linked files.
    pub bytes_linked: u64,
    pub skipped_too_small: usize,
    pub skipped_too_large: usize,
    pub skipped_extension: usize,
    pub skipped_inside_output: usize,
}

impl FlattenSummary {
    /// Record a created link.
    pub fn record_link(&mut self, bytes: u64) {
        self.linked += 1;
        self.bytes_linked += bytes;
    }

    /// Record a file left out by a filter.
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooSmall => self.skipped_too_small += 1,
            SkipReason::TooLarge => self.skipped_too_large += 1,
            SkipReason::ExtensionMismatch => self.skipped_extension += 1,
            SkipReason::InsideOutput => self.skipped_inside_output += 1,
        }
    }

    /// Total number of files skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.skipped_too_small
            + self.skipped_too_large
            + self.skipped_extension
            + self.skipped_inside_output
    }

    /// Files looked at, linked or not.
    pub fn files_seen(&self) -> usize {
        self.linked + self.skipped()
    }

    /// Get a human-readable summary of the run.
    pub fn summary(&self) -> String {
        let size = humansize::format_size(self.bytes_linked, humansize::BINARY);
        if self.skipped() == 0 {
            format!("Linked {} files ({size})", self.linked)
        } else {
            format!(
                "Linked {} files ({size}), skipped {}",
                self.linked,
                self.skipped()
            )
        }
    }
}
