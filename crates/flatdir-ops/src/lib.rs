//! Flattening engine for flatdir.
//!
//! This crate drives the [`TreeWalker`](flatdir_scan::TreeWalker), applies
//! the extension and size filters from a [`FlattenConfig`] and hardlinks
//! every surviving file into a single output directory.
//!
//! The first failure aborts the run. Links created before the failure are
//! left in place.

mod conflict;
mod error;
mod filter;
mod flatten;
mod summary;

pub use conflict::ConflictKind;
pub use error::{FlattenError, LinkError};
pub use filter::{EntryFilter, SkipReason};
pub use flatten::{Flattener, flatten};
pub use summary::FlattenSummary;

// Re-export core types for convenience
pub use flatdir_core::{FlattenConfig, ScanError, SizeThreshold};
