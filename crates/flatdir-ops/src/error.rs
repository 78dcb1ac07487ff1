//! Flatten error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

use flatdir_core::ScanError;

use crate::conflict::ConflictKind;

/// A hardlink that could not be created.
#[derive(Debug, Error)]
#[error("{kind}: cannot link {} -> {}", .destination.display(), .source_path.display())]
pub struct LinkError {
    /// The file being linked.
    pub source_path: PathBuf,
    /// Where the link was supposed to go.
    pub destination: PathBuf,
    /// The kind of failure.
    pub kind: ConflictKind,
    #[source]
    pub source: std::io::Error,
}

impl LinkError {
    /// Create a link error, classifying the underlying I/O error.
    pub fn new(source_path: &Path, destination: &Path, source: std::io::Error) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            destination: destination.to_path_buf(),
            kind: ConflictKind::classify(&source),
            source,
        }
    }

    /// True if the destination name was already taken.
    pub fn is_collision(&self) -> bool {
        self.kind == ConflictKind::NameCollision
    }
}

/// Errors that abort a flatten run.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The output directory could not be created.
    #[error("Cannot create output directory {}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the input tree failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A hardlink could not be created.
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl FlattenError {
    /// The link failure kind, if this is a link error.
    pub fn conflict_kind(&self) -> Option<ConflictKind> {
        match self {
            Self::Link(err) => Some(err.kind),
            _ => None,
        }
    }
}
