#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # PNG Colorizer
//!
//! Flattens transparent PNG images onto solid background colors, producing
//! opaque training images for image-learning pipelines.
//!
//! Background colors are drawn from an evenly spaced HSL grid (the "color
//! cube"), optionally jittered by up to half a grid cell, shuffled, and
//! truncated to the requested count. Every input pixel is alpha-composited
//! onto each color.
//!
//! ## Features
//!
//! - **Deterministic palettes**: every random draw goes through a caller-supplied
//!   [`rand::Rng`], so a seeded `StdRng` reproduces a dataset exactly
//! - **Two batch modes**: a fresh palette per input, or one palette cycled over
//!   all inputs
//! - **Paired data**: optional mirrored copies of inputs and outputs
//! - **Manifest**: optional JSON record of every generated file
//! - **CLI Integration**: the `colorizer` binary (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use png_colorizer::{BatchProcessor, ColorizerConfig, services::LoggingProgressReporter};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::path::PathBuf;
//!
//! # fn example() -> png_colorizer::Result<()> {
//! let config = ColorizerConfig::builder()
//!     .output_dir("dataset/flat")
//!     .num_colors(16)
//!     .add_disturbance(true)
//!     .build()?;
//!
//! let inputs = vec![PathBuf::from("sprites/hero.png"), PathBuf::from("sprites/lamp.png")];
//! let mut rng = StdRng::seed_from_u64(7);
//! let report = BatchProcessor::new(config)?.run(&inputs, None, &mut rng, &LoggingProgressReporter)?;
//! println!("{} outputs, {} failures", report.output_count(), report.failed_count());
//! # Ok(())
//! # }
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface, progress bar and tracing subscriber setup
//! - `tracing-json`: JSON log output for the CLI

pub mod color;
pub mod compositing;
pub mod config;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod palette;
pub mod processor;
pub mod services;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod tracing_config;

use image::RgbImage;
use rand::Rng;
use std::path::Path;

// Public API exports
pub use color::{Hsl, Rgb};
pub use compositing::{composite_all, composite_onto};
pub use config::{BatchMode, ColorSpaceConfig, ColorizerConfig, ColorizerConfigBuilder};
pub use error::{ColorizerError, Result};
pub use manifest::{Manifest, ManifestEntry};
pub use naming::OutputNamer;
pub use palette::{ColorGrid, PaletteGenerator};
pub use processor::{BatchProcessor, BatchReport, Colorizer, FileFailure, GeneratedOutput};
pub use services::{ImageIOService, LoggingProgressReporter, NoOpProgressReporter, ProgressReporter};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig, TracingFormat};

/// Colorize a single transparent PNG in memory
///
/// Loads `path`, draws `config.num_colors` background colors from `rng` and
/// returns each color with its composite. Nothing is written to disk.
///
/// # Examples
///
/// ```rust,no_run
/// use png_colorizer::{colorize_file, ColorizerConfig};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// # fn example() -> png_colorizer::Result<()> {
/// let config = ColorizerConfig::builder().num_colors(4).build()?;
/// let results = colorize_file("hero.png", &config, &mut StdRng::seed_from_u64(1))?;
/// for (color, image) in results {
///     image.save(format!("hero_{}.png", color.to_hex().trim_start_matches('#')))?;
/// }
/// # Ok(())
/// # }
/// ```
pub fn colorize_file<P: AsRef<Path>, R: Rng + ?Sized>(
    path: P,
    config: &ColorizerConfig,
    rng: &mut R,
) -> Result<Vec<(Rgb, RgbImage)>> {
    let colorizer = Colorizer::new(config.clone())?;
    let image = ImageIOService::load_transparent_png(path, config.allow_opaque)?;
    Ok(colorizer.colorize(&image, rng))
}
