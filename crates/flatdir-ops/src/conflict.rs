//! Classification of hardlink failures.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

/// Why a hardlink could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Something already exists at the destination, usually a file with the
    /// same base name linked earlier in the run.
    NameCollision,
    /// Source and destination live on different filesystems.
    CrossDevice,
    /// The filesystem refused the link.
    PermissionDenied,
    /// Any other I/O failure.
    Other,
}

impl ConflictKind {
    /// Classify the error returned by `std::fs::hard_link`.
    pub fn classify(error: &std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::AlreadyExists => Self::NameCollision,
            ErrorKind::CrossesDevices => Self::CrossDevice,
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameCollision => write!(f, "Destination already exists"),
            Self::CrossDevice => write!(f, "Cannot hardlink across filesystems"),
            Self::PermissionDenied => write!(f, "Permission denied"),
            Self::Other => write!(f, "Link failed"),
        }
    }
}
