//! Colorizing processor
//!
//! [`Colorizer`] turns one transparent image into `num_colors` opaque
//! composites. [`BatchProcessor`] drives it over a list of input files,
//! writes the results with sequential names, mirrors copies into the optional
//! copy directories, and collects per-file failures without stopping.

use crate::{
    color::Rgb,
    compositing::{composite_all, composite_onto},
    config::{BatchMode, ColorizerConfig},
    error::{ColorizerError, Result},
    manifest::{Manifest, ManifestEntry, MANIFEST_FILE_NAME},
    naming::{input_stem, OutputNamer},
    palette::PaletteGenerator,
    services::{ImageIOService, ProgressReporter},
};
use image::{RgbImage, RgbaImage};
use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, trace, warn};

/// Composites a single transparent image onto a generated palette
#[derive(Debug, Clone)]
pub struct Colorizer {
    config: ColorizerConfig,
    palette: PaletteGenerator,
}

impl Colorizer {
    /// Create a colorizer, validating the configuration
    pub fn new(config: ColorizerConfig) -> Result<Self> {
        config.validate()?;
        let palette = PaletteGenerator::new(config.color_space);
        Ok(Self { config, palette })
    }

    #[must_use]
    pub fn config(&self) -> &ColorizerConfig {
        &self.config
    }

    /// Draw `num_colors` background colors, disturbed if configured
    pub fn palette<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Rgb> {
        self.palette
            .generate(self.config.num_colors, self.config.add_disturbance, rng)
    }

    /// Composite `image` onto a fresh palette
    ///
    /// Returns exactly `num_colors` `(background, composite)` pairs.
    pub fn colorize<R: Rng + ?Sized>(&self, image: &RgbaImage, rng: &mut R) -> Vec<(Rgb, RgbImage)> {
        let colors = self.palette(rng);
        let composites = composite_all(image, &colors);
        colors.into_iter().zip(composites).collect()
    }
}

/// One file written to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Full path of the written composite
    pub path: PathBuf,
    /// Path relative to the output directory (and to the copy directories)
    pub relative_path: PathBuf,
    /// Transparent source image
    pub source: PathBuf,
    pub color: Rgb,
}

/// A file that could not be processed
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ColorizerError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outputs: Vec<GeneratedOutput>,
    pub failures: Vec<FileFailure>,
    /// Inputs that contributed at least one output
    pub processed_inputs: usize,
    /// Where the manifest was written, if requested
    pub manifest_path: Option<PathBuf>,
}

impl BatchReport {
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn processed_inputs(&self) -> usize {
        self.processed_inputs
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, path: &Path, error: ColorizerError, reporter: &dyn ProgressReporter) {
        debug!("Skipping {}: {}", path.display(), error);
        reporter.report_error(path, &error.to_string());
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error,
        });
    }
}

/// Drives a [`Colorizer`] over a list of input files
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    colorizer: Colorizer,
    namer: OutputNamer,
}

impl BatchProcessor {
    pub fn new(config: ColorizerConfig) -> Result<Self> {
        let namer = OutputNamer::new(config.digits);
        let colorizer = Colorizer::new(config)?;
        Ok(Self { colorizer, namer })
    }

    #[must_use]
    pub fn config(&self) -> &ColorizerConfig {
        self.colorizer.config()
    }

    #[must_use]
    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    /// Process `inputs` in order
    ///
    /// `input_root` is the directory the inputs were discovered under; the
    /// part of each input path below it is mirrored into the output directory
    /// in per-input mode.
    ///
    /// # Errors
    /// Only batch-level failures are returned: the output or copy directories
    /// cannot be created, or the manifest cannot be written. Failures of
    /// individual files are collected in the [`BatchReport`].
    pub fn run<R: Rng + ?Sized>(
        &self,
        inputs: &[PathBuf],
        input_root: Option<&Path>,
        rng: &mut R,
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchReport> {
        let config = self.config();
        let _span = info_span!(
            "colorize_batch",
            inputs = inputs.len(),
            num_colors = config.num_colors,
            mode = ?config.mode
        )
        .entered();

        ImageIOService::ensure_dir(&config.output_dir)?;
        for dir in [&config.copy_input_dir, &config.copy_output_dir]
            .into_iter()
            .flatten()
        {
            ImageIOService::ensure_dir(dir)?;
        }

        let mut report = match config.mode {
            BatchMode::PerInput => self.run_per_input(inputs, input_root, rng, reporter),
            BatchMode::Cycle => self.run_cycle(inputs, rng, reporter),
        };

        if config.write_manifest {
            let path = config.output_dir.join(MANIFEST_FILE_NAME);
            self.build_manifest(&report).write_to(&path)?;
            debug!(path = %path.display(), "Manifest written");
            report.manifest_path = Some(path);
        }

        reporter.report_batch_completed(report.output_count(), report.failed_count());
        Ok(report)
    }

    fn run_per_input<R: Rng + ?Sized>(
        &self,
        inputs: &[PathBuf],
        input_root: Option<&Path>,
        rng: &mut R,
        reporter: &dyn ProgressReporter,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        let total = inputs.len();
        reporter.report_batch_started(total);

        // Output prefix (relative dir + stem) to the input that wrote under it
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

        for (position, input) in inputs.iter().enumerate() {
            reporter.report_item_started(input, position + 1, total);

            let relative_dir = relative_parent(input, input_root);
            let stem = input_stem(input);
            let prefix = relative_dir.join(&stem);
            if let Some(owner) = claimed.get(&prefix) {
                let error = ColorizerError::output_collision(&prefix.display().to_string(), owner);
                report.record_failure(input, error, reporter);
                continue;
            }

            let mut outputs = Vec::new();
            let result = self.process_input(input, &relative_dir, &stem, rng, &mut outputs);
            let written = outputs.len();
            if written > 0 {
                claimed.insert(prefix, input.as_path());
                report.processed_inputs += 1;
                report.outputs.append(&mut outputs);
            }

            match result {
                Ok(()) => reporter.report_item_completed(input, written),
                Err(e) => report.record_failure(input, e, reporter),
            }
        }

        report
    }

    /// Composite one input onto its own palette and write every result
    ///
    /// Written outputs are pushed as they land, so a failure part way through
    /// leaves the earlier ones in `outputs`.
    fn process_input<R: Rng + ?Sized>(
        &self,
        input: &Path,
        relative_dir: &Path,
        stem: &str,
        rng: &mut R,
        outputs: &mut Vec<GeneratedOutput>,
    ) -> Result<()> {
        let _span = info_span!("colorize_file", path = %input.display()).entered();

        let image = ImageIOService::load_transparent_png(input, self.config().allow_opaque)?;
        let colors = self.colorizer.palette(rng);
        outputs.reserve(colors.len());

        for (index, color) in colors.into_iter().enumerate() {
            let relative = relative_dir.join(self.namer.name_for(stem, index + 1));
            let composite = composite_onto(&image, color);
            outputs.push(self.write_output(&composite, relative, input, color)?);
        }

        Ok(())
    }

    fn run_cycle<R: Rng + ?Sized>(
        &self,
        inputs: &[PathBuf],
        rng: &mut R,
        reporter: &dyn ProgressReporter,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        let allow_opaque = self.config().allow_opaque;

        let mut sources = Vec::with_capacity(inputs.len());
        for input in inputs {
            match ImageIOService::load_transparent_png(input, allow_opaque) {
                Ok(image) => sources.push((input.as_path(), image)),
                Err(e) => report.record_failure(input, e, reporter),
            }
        }

        if sources.is_empty() {
            warn!("No usable input images to cycle over");
            return report;
        }

        let palette = self.colorizer.palette(rng);
        let total = palette.len();
        if sources.len() > total {
            info!(
                "Only the first {} of {} input images are used with {} colors",
                total,
                sources.len(),
                total
            );
        }
        report.processed_inputs = sources.len().min(total);
        reporter.report_batch_started(total);

        for (index, ((source, image), color)) in sources.iter().cycle().zip(palette).enumerate() {
            let position = index + 1;
            reporter.report_item_started(source, position, total);

            let relative = PathBuf::from(self.namer.sequence_name(position));
            let composite = composite_onto(image, color);
            match self.write_output(&composite, relative, source, color) {
                Ok(output) => {
                    reporter.report_item_completed(source, 1);
                    report.outputs.push(output);
                },
                Err(e) => report.record_failure(source, e, reporter),
            }
        }

        report
    }

    /// Save a composite and its mirrored copies
    fn write_output(
        &self,
        composite: &RgbImage,
        relative: PathBuf,
        source: &Path,
        color: Rgb,
    ) -> Result<GeneratedOutput> {
        let config = self.config();
        let path = config.output_dir.join(&relative);
        ImageIOService::save_png(composite, &path)?;

        if let Some(dir) = &config.copy_input_dir {
            ImageIOService::copy_file(source, dir.join(&relative))?;
        }
        if let Some(dir) = &config.copy_output_dir {
            ImageIOService::copy_file(&path, dir.join(&relative))?;
        }

        trace!(
            output = %path.display(),
            source = %source.display(),
            color = %color,
            "Composite written"
        );

        Ok(GeneratedOutput {
            path,
            relative_path: relative,
            source: source.to_path_buf(),
            color,
        })
    }

    fn build_manifest(&self, report: &BatchReport) -> Manifest {
        let mut manifest = Manifest::new(self.config());
        for output in &report.outputs {
            manifest.push(ManifestEntry::new(
                output.relative_path.clone(),
                output.source.clone(),
                output.color,
            ));
        }
        manifest
    }
}

/// Directory of `input` relative to `root`, empty when not below it
fn relative_parent(input: &Path, root: Option<&Path>) -> PathBuf {
    root.and_then(|r| input.strip_prefix(r).ok())
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
