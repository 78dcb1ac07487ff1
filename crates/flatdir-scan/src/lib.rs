//! Directory tree walking for flatdir.
//!
//! This crate provides [`TreeWalker`], a lazy, single-threaded iterator over
//! every file and directory below a root path.
//!
//! # Overview
//!
//! - **Lazy**: entries are produced one directory listing at a time, so the
//!   caller can act on them while the scan is still running
//! - **Ordered**: a directory's direct entries come before the contents of
//!   any of its subdirectories
//! - **Fail-fast friendly**: I/O problems are yielded as `Err` items carrying
//!   the offending path
//!
//! # Example
//!
//! ```rust,no_run
//! use flatdir_scan::TreeWalker;
//!
//! for entry in TreeWalker::new("/path/to/scan") {
//!     let entry = entry.unwrap();
//!     println!("{} ({:?} bytes)", entry.path().display(), entry.size());
//! }
//! ```

mod walker;

pub use walker::TreeWalker;

// Re-export core types for convenience
pub use flatdir_core::{DirectoryEntry, ScanError};
