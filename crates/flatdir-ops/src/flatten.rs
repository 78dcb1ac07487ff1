//! The flatten pass: walk, filter, hardlink.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use flatdir_core::{DirectoryEntry, FlattenConfig, ScanError};
use flatdir_scan::TreeWalker;

use crate::error::{FlattenError, LinkError};
use crate::filter::{EntryFilter, SkipReason};
use crate::summary::FlattenSummary;

/// Hardlinks every matching file below the input directory into the
/// output directory.
///
/// Stops at the first error. Links already created are kept.
#[derive(Debug, Clone)]
pub struct Flattener {
    config: FlattenConfig,
    filter: EntryFilter,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        let filter = EntryFilter::from_config(&config);
        Self { config, filter }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Run the flatten pass.
    pub fn run(&self) -> Result<FlattenSummary, FlattenError> {
        let input_dir = &self.config.input_dir;
        let output_dir = &self.config.output_dir;

        let root = self.check_input()?;
        self.ensure_output_dir()?;
        let nested_output = self.nested_output(&root)?;

        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            extension = %self.config.extension,
            filtered = self.config.is_filtered(),
            min_size = self.config.min_bytes(),
            max_size = ?self.config.max_bytes(),
            "flattening"
        );

        let mut summary = FlattenSummary::default();

        for entry in TreeWalker::new(&root) {
            let entry = entry.inspect_err(|e| {
                debug!(path = %e.path().display(), error = %e, "scan failed");
            })?;

            if entry.is_dir() {
                summary.directories += 1;
                continue;
            }

            let skip = match nested_output {
                Some(ref nested) if entry.path().starts_with(nested) => {
                    Some(SkipReason::InsideOutput)
                }
                _ => self.filter.check(&entry),
            };
            if let Some(reason) = skip {
                debug!(path = %entry.path().display(), %reason, "skipped");
                summary.record_skip(reason);
                continue;
            }

            self.link(&entry)?;
            summary.record_link(entry.size().unwrap_or(0));
        }

        info!(
            linked = summary.linked,
            skipped = summary.skipped(),
            directories = summary.directories,
            "flatten complete"
        );

        Ok(summary)
    }

    /// Verify the input is a directory and return its absolute path.
    fn check_input(&self) -> Result<PathBuf, ScanError> {
        let input_dir = &self.config.input_dir;
        let metadata = fs::metadata(input_dir).map_err(|e| ScanError::io(input_dir, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: input_dir.clone(),
            });
        }
        std::path::absolute(input_dir).map_err(|e| ScanError::io(input_dir, e))
    }

    /// Create the output directory and any missing parents.
    fn ensure_output_dir(&self) -> Result<(), FlattenError> {
        let output_dir = &self.config.output_dir;
        if output_dir.is_dir() {
            return Ok(());
        }
        debug!(path = %output_dir.display(), "creating output directory");
        fs::create_dir_all(output_dir).map_err(|source| FlattenError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })
    }

    /// Where the output directory appears in the walk, if it lies strictly
    /// below the input root. Files there are the links this run creates.
    ///
    /// An output equal to the input is not nested: its files are linked
    /// onto themselves and fail as collisions.
    fn nested_output(&self, root: &Path) -> Result<Option<PathBuf>, ScanError> {
        let input = fs::canonicalize(root).map_err(|e| ScanError::io(root, e))?;
        let output_dir = &self.config.output_dir;
        let output = fs::canonicalize(output_dir).map_err(|e| ScanError::io(output_dir, e))?;

        Ok(output
            .strip_prefix(&input)
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .map(|relative| root.join(relative)))
    }

    fn link(&self, entry: &DirectoryEntry) -> Result<(), LinkError> {
        let source = entry.path();
        let file_name = source
            .file_name()
            .unwrap_or_else(|| OsStr::new(entry.name()));
        let destination = self.config.output_dir.join(file_name);

        fs::hard_link(source, &destination)
            .map_err(|e| LinkError::new(source, &destination, e))?;

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            size = ?entry.size(),
            "linked"
        );
        Ok(())
    }
}

/// Flatten `config.input_dir` into `config.output_dir`.
pub fn flatten(config: &FlattenConfig) -> Result<FlattenSummary, FlattenError> {
    Flattener::new(config.clone()).run()
}
