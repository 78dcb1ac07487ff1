//! flatdir - Flatten files in nested subdirectories into a single directory.
//!
//! Usage:
//!   flatten <INDIR> <OUTDIR>                 Hardlink every file below INDIR into OUTDIR
//!   flatten -t jpg <INDIR> <OUTDIR>          Only names ending in "jpg" (any case)
//!   flatten -m 512kB -M 2MB <INDIR> <OUTDIR> Only files within a size range
//!   flatten --help                           Show help

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flatdir_core::{SizeBase, SizeThreshold, parse_size};
use flatdir_ops::{FlattenConfig, Flattener};

#[derive(Parser)]
#[command(
    name = "flatten",
    version,
    about = "Flatten files in nested subdirectories into a single directory",
    long_about = "Recursively finds files below <INDIR> and places a hardlink to each \
                  of them directly in <OUTDIR>.\n\n\
                  Input and output must be on the same filesystem. Two files with the \
                  same name abort the run at the second one; links made so far are kept."
)]
struct Cli {
    /// Input directory to flatten.
    indir: PathBuf,

    /// Output directory: all files recursively found in <INDIR> will be
    /// placed here. Created if it doesn't exist.
    outdir: PathBuf,

    /// Only flatten files whose name ends with this (case-insensitive).
    #[arg(short = 't', long)]
    filetype: Option<String>,

    /// Skip files smaller than this size. Accepts human-readable sizes such
    /// as '512kB'.
    #[arg(short = 'm', long, value_name = "SIZE")]
    minsize: Option<String>,

    /// Skip files larger than this size. Accepts human-readable sizes such
    /// as '512kB'.
    #[arg(short = 'M', long, value_name = "SIZE")]
    maxsize: Option<String>,

    /// Read size units as powers of 1000 instead of 1024.
    #[arg(long)]
    decimal: bool,

    /// Log every link and skipped file.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = build_config(cli)?;
    debug!(?config, "resolved configuration");

    let flattener = Flattener::new(config);
    let summary = flattener.run().wrap_err_with(|| {
        let config = flattener.config();
        format!(
            "Failed to flatten {} into {}",
            config.input_dir.display(),
            config.output_dir.display()
        )
    })?;

    eprintln!("{}", summary.summary());

    Ok(())
}

/// Turn command-line arguments into a validated flatten config.
fn build_config(cli: Cli) -> Result<FlattenConfig> {
    let base = if cli.decimal {
        SizeBase::Decimal
    } else {
        SizeBase::Binary
    };
    let min_size = parse_size_arg(cli.minsize.as_deref(), base).wrap_err("Invalid --minsize")?;
    let max_size = parse_size_arg(cli.maxsize.as_deref(), base).wrap_err("Invalid --maxsize")?;

    let mut builder = FlattenConfig::builder();
    builder.input_dir(cli.indir).output_dir(cli.outdir);
    if let Some(filetype) = cli.filetype {
        builder.extension(filetype);
    }
    if let Some(min_size) = min_size {
        builder.min_size(min_size);
    }
    if let Some(max_size) = max_size {
        builder.max_size(max_size);
    }

    builder.build().wrap_err("Invalid configuration")
}

fn parse_size_arg(
    text: Option<&str>,
    base: SizeBase,
) -> Result<Option<SizeThreshold>, flatdir_core::SizeParseError> {
    text.map(|text| parse_size(text, base)).transpose()
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("flatten=debug,flatdir=debug,flatdir_ops=debug,flatdir_scan=debug,warn")
        } else {
            EnvFilter::new("flatten=info,flatdir=info,flatdir_ops=info,flatdir_scan=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
