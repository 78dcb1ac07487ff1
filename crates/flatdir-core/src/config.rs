//! Flatten configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::size::SizeThreshold;

/// Configuration for a single flatten run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct FlattenConfig {
    /// Directory tree to scan.
    pub input_dir: PathBuf,

    /// Directory that receives the hardlinks. Created if missing.
    pub output_dir: PathBuf,

    /// Case-insensitive suffix the file name must end with (empty = any).
    #[builder(default)]
    #[serde(default)]
    pub extension: String,

    /// Skip files smaller than this.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub min_size: Option<SizeThreshold>,

    /// Skip files larger than this.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub max_size: Option<SizeThreshold>,
}

impl FlattenConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.input_dir {
            Some(ref dir) if dir.as_os_str().is_empty() => {
                return Err("Input directory cannot be empty".to_string());
            }
            None => return Err("Input directory is required".to_string()),
            _ => {}
        }
        match self.output_dir {
            Some(ref dir) if dir.as_os_str().is_empty() => {
                return Err("Output directory cannot be empty".to_string());
            }
            None => return Err("Output directory is required".to_string()),
            _ => {}
        }
        if let (Some(Some(min)), Some(Some(max))) = (self.min_size, self.max_size) {
            if min > max {
                return Err(format!(
                    "Minimum size ({min}) is larger than maximum size ({max})"
                ));
            }
        }
        Ok(())
    }
}

impl FlattenConfig {
    /// Create a new flatten config builder.
    pub fn builder() -> FlattenConfigBuilder {
        FlattenConfigBuilder::default()
    }

    /// Create an unfiltered config linking everything in `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extension: String::new(),
            min_size: None,
            max_size: None,
        }
    }

    /// Effective lower bound in bytes (0 when unset).
    pub fn min_bytes(&self) -> u64 {
        self.min_size.map_or(0, SizeThreshold::bytes)
    }

    /// Effective upper bound in bytes, if any.
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_size.map(SizeThreshold::bytes)
    }

    /// Whether any filter narrows the set of linked files.
    pub fn is_filtered(&self) -> bool {
        !self.extension.is_empty() || self.min_size.is_some() || self.max_size.is_some()
    }
}
