//! Colorizer CLI tool
//!
//! Command-line interface that composites every transparent PNG of a
//! directory onto generated background colors.

use super::{config::CliConfigBuilder, progress::CliProgressReporter};
use crate::{
    processor::{BatchProcessor, BatchReport},
    services::ImageIOService,
    tracing_config::{init_cli_tracing, spans, TracingFormat},
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Composite transparent PNGs onto solid background colors
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "colorizer")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory containing the transparent PNG inputs
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory the flattened outputs are written to (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of background colors (outputs per input, or outputs in total with --cycle_inputs)
    #[arg(long = "num_colors", visible_alias = "num-colors", value_name = "N")]
    pub num_colors: usize,

    /// Zero-padding width of the output sequence number
    #[arg(long, default_value_t = 4, value_name = "D")]
    pub digits: usize,

    /// Jitter every grid color by up to half a cell
    #[arg(long = "add_disturbance", visible_alias = "add-disturbance")]
    pub add_disturbance: bool,

    /// Also copy the source PNG of every output into this directory, under the output's name
    #[arg(long = "copy_input_dir", visible_alias = "copy-input-dir", value_name = "DIR")]
    pub copy_input_dir: Option<PathBuf>,

    /// Also copy every output into this directory
    #[arg(long = "copy_output_dir", visible_alias = "copy-output-dir", value_name = "DIR")]
    pub copy_output_dir: Option<PathBuf>,

    /// Draw one palette for the whole batch and reuse the inputs round-robin
    #[arg(long = "cycle_inputs", visible_alias = "cycle-inputs")]
    pub cycle_inputs: bool,

    /// Seed for reproducible palettes
    #[arg(long, value_name = "S")]
    pub seed: Option<u64>,

    /// Grid points per HSL axis
    #[arg(long, default_value_t = 8, value_name = "K")]
    pub divisions: usize,

    #[arg(long = "min_saturation", visible_alias = "min-saturation", default_value_t = 0.0)]
    pub min_saturation: f64,

    #[arg(long = "max_saturation", visible_alias = "max-saturation", default_value_t = 1.0)]
    pub max_saturation: f64,

    #[arg(long = "min_lightness", visible_alias = "min-lightness", default_value_t = 0.0)]
    pub min_lightness: f64,

    #[arg(long = "max_lightness", visible_alias = "max-lightness", default_value_t = 1.0)]
    pub max_lightness: f64,

    /// Accept PNGs without an alpha channel (treated as fully opaque)
    #[arg(long = "allow_opaque", visible_alias = "allow-opaque")]
    pub allow_opaque: bool,

    /// Process the input directory recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// File name pattern for input selection (e.g., "hero_*.png")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Write manifest.json describing every output
    #[arg(long)]
    pub manifest: bool,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log_format", visible_alias = "log-format", value_enum, default_value_t = CliLogFormat::Console)]
    pub log_format: CliLogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliLogFormat {
    Console,
    Compact,
    #[cfg(feature = "tracing-json")]
    Json,
}

impl From<CliLogFormat> for TracingFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Console => Self::Console,
            CliLogFormat::Compact => Self::Compact,
            #[cfg(feature = "tracing-json")]
            CliLogFormat::Json => Self::Json,
        }
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let session_id = init_cli_tracing(cli.verbose, cli.log_format.into())
        .context("Failed to initialize tracing")?;
    let _session = spans::session(&session_id, &cli.input_dir).entered();

    CliConfigBuilder::validate_cli(&cli)?;
    let config = CliConfigBuilder::from_cli(&cli)?;

    let files = {
        let _discovery = spans::discovery(&cli.input_dir, cli.recursive).entered();
        find_png_files(&cli.input_dir, cli.recursive, cli.pattern.as_deref()).with_context(
            || format!("Failed to read input directory: {}", cli.input_dir.display()),
        )?
    };

    if files.is_empty() {
        warn!(
            "No PNG files found in {}; nothing to do",
            cli.input_dir.display()
        );
        return Ok(());
    }

    info!("Found {} PNG file(s) to process", files.len());

    let mut rng = match config.seed {
        Some(seed) => {
            debug!(seed, "Seeding palette generator");
            StdRng::seed_from_u64(seed)
        },
        None => StdRng::from_entropy(),
    };

    let processor = BatchProcessor::new(config).context("Invalid configuration")?;
    let reporter = CliProgressReporter::new();
    let batch_start_time = Instant::now();

    let report = processor
        .run(&files, Some(&cli.input_dir), &mut rng, &reporter)
        .context("Batch processing failed")?;

    log_summary(&report, files.len(), batch_start_time.elapsed().as_secs_f64());
    Ok(())
}

fn log_summary(report: &BatchReport, file_count: usize, total_seconds: f64) {
    if report.failed_count() > 0 {
        warn!(
            "Some files failed to process. Processed: {}, Failed: {}",
            report.processed_inputs(),
            report.failed_count()
        );
    }

    info!("Batch summary:");
    info!("  Files found: {}", file_count);
    info!("  Inputs used: {}", report.processed_inputs());
    info!("  Files failed: {}", report.failed_count());
    info!("  Outputs written: {}", report.output_count());
    info!("  Total time: {:.2}s", total_seconds);
    if let Some(path) = &report.manifest_path {
        info!("  Manifest: {}", path.display());
    }
}

/// Find PNG files in a directory, sorted alphanumerically
fn find_png_files(dir: &Path, recursive: bool, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if recursive {
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let path = entry.path();
                if ImageIOService::is_png_path(path) && matches_pattern(path, pattern) {
                    files.push(path.to_path_buf());
                }
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                if ImageIOService::is_png_path(&path) && matches_pattern(&path, pattern) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check if the file name matches the given glob pattern
fn matches_pattern(path: &Path, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pat) => path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|filename| {
                glob::Pattern::new(pat)
                    .map(|p| p.matches(filename))
                    .unwrap_or(false)
            }),
        None => true,
    }
}
