//! Core types for flatdir.
//!
//! This crate provides the data structures shared by the scanner and the
//! flattening engine: directory entries, size thresholds (with the
//! human-readable size parser) and the flatten configuration.

mod config;
mod entry;
mod error;
mod size;

pub use config::{FlattenConfig, FlattenConfigBuilder, FlattenConfigBuilderError};
pub use entry::DirectoryEntry;
pub use error::{ScanError, SizeParseError};
pub use size::{SizeBase, SizeThreshold, parse_size};
