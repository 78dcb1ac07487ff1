//! Error types for scanning and size parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while walking a directory tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            std::io::ErrorKind::NotFound => Self::NotFound { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::PermissionDenied { path, .. }
            | Self::NotFound { path, .. }
            | Self::Io { path, .. }
            | Self::NotADirectory { path } => path,
        }
    }
}

/// Errors produced when parsing a human-readable size spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeParseError {
    /// The text does not look like `<number>[unit][b]`.
    #[error(
        "Not a valid size spec: {input:?}. Examples of valid specs include 4500, 512MB, 20kb, and 2TB."
    )]
    InvalidFormat { input: String },

    /// The spec is well-formed but does not fit in 64 bits.
    #[error("Size spec {input:?} is too large to represent in bytes")]
    Overflow { input: String },
}

impl SizeParseError {
    pub(crate) fn invalid(input: &str) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
        }
    }

    pub(crate) fn overflow(input: &str) -> Self {
        Self::Overflow {
            input: input.to_string(),
        }
    }
}
