//! Configuration types for colorizing operations

use crate::error::{ColorizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Widest zero-padding accepted for output sequence numbers
pub const MAX_DIGITS: usize = 12;

/// Most grid points per HSL axis
pub const MAX_DIVISIONS: usize = 100;

/// Largest palette a single batch may request (a full `MAX_DIVISIONS³` grid)
pub const MAX_NUM_COLORS: usize = MAX_DIVISIONS * MAX_DIVISIONS * MAX_DIVISIONS;

/// How input files and generated colors are paired up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatchMode {
    /// Every input gets its own palette of `num_colors` backgrounds
    #[default]
    PerInput,
    /// One palette for the whole batch; output `i` reuses input `i % inputs`
    Cycle,
}

/// Shape of the HSL grid that background colors are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpaceConfig {
    /// Number of grid points along each of the three HSL axes
    pub divisions: usize,
    /// Inclusive saturation range of the grid
    pub saturation: (f64, f64),
    /// Inclusive lightness range of the grid
    pub lightness: (f64, f64),
}

impl Default for ColorSpaceConfig {
    fn default() -> Self {
        Self {
            divisions: 8,
            saturation: (0.0, 1.0),
            lightness: (0.0, 1.0),
        }
    }
}

impl ColorSpaceConfig {
    /// Validate grid dimensions and ranges
    pub fn validate(&self) -> Result<()> {
        if self.divisions == 0 || self.divisions > MAX_DIVISIONS {
            return Err(ColorizerError::config_value_error(
                "divisions",
                self.divisions,
                "1-100",
                Some(8),
            ));
        }
        validate_unit_range("saturation", self.saturation)?;
        validate_unit_range("lightness", self.lightness)?;
        Ok(())
    }
}

fn validate_unit_range(name: &str, (min, max): (f64, f64)) -> Result<()> {
    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    if !in_unit(min) || !in_unit(max) {
        return Err(ColorizerError::invalid_config(format!(
            "{} range {}..{} must lie within 0..1",
            name, min, max
        )));
    }
    if min > max {
        return Err(ColorizerError::invalid_config(format!(
            "{} range minimum {} exceeds maximum {}",
            name, min, max
        )));
    }
    Ok(())
}

/// Configuration for a colorizing batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ColorizerConfig {
    /// Directory the composited PNGs are written to
    pub output_dir: PathBuf,

    /// Number of background colors (and outputs) per palette
    pub num_colors: usize,

    /// Zero-padding width of output sequence numbers
    pub digits: usize,

    /// Jitter each grid color before sampling
    pub add_disturbance: bool,

    /// Pairing of inputs and colors
    pub mode: BatchMode,

    /// HSL grid the palette is drawn from
    pub color_space: ColorSpaceConfig,

    /// Receives a copy of the source PNG under each output's name
    pub copy_input_dir: Option<PathBuf>,

    /// Receives a duplicate of every generated output
    pub copy_output_dir: Option<PathBuf>,

    /// Treat inputs without an alpha channel as fully opaque instead of rejecting them
    pub allow_opaque: bool,

    /// Write `manifest.json` into the output directory
    pub write_manifest: bool,

    /// Seed for palette generation, recorded in the manifest
    pub seed: Option<u64>,
}

impl Default for ColorizerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            num_colors: 1,
            digits: 4,
            add_disturbance: false,
            mode: BatchMode::default(),
            color_space: ColorSpaceConfig::default(),
            copy_input_dir: None,
            copy_output_dir: None,
            allow_opaque: false,
            write_manifest: false,
            seed: None,
        }
    }
}

impl ColorizerConfig {
    /// Create a new configuration builder
    ///
    /// # Examples
    ///
    /// ```rust
    /// use png_colorizer::ColorizerConfig;
    ///
    /// let config = ColorizerConfig::builder()
    ///     .output_dir("out")
    ///     .num_colors(16)
    ///     .digits(5)
    ///     .add_disturbance(true)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.num_colors, 16);
    /// ```
    #[must_use]
    pub fn builder() -> ColorizerConfigBuilder {
        ColorizerConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Validation Rules
    ///
    /// - `num_colors`: 1 to [`MAX_NUM_COLORS`]
    /// - `digits`: 1 to [`MAX_DIGITS`]
    /// - color space: 1 to [`MAX_DIVISIONS`] divisions, ranges ordered and within 0..1
    pub fn validate(&self) -> Result<()> {
        if self.num_colors == 0 || self.num_colors > MAX_NUM_COLORS {
            return Err(ColorizerError::config_value_error(
                "num_colors",
                self.num_colors,
                "1-1000000",
                None,
            ));
        }

        if self.digits == 0 || self.digits > MAX_DIGITS {
            return Err(ColorizerError::config_value_error(
                "digits",
                self.digits,
                "1-12",
                Some(4),
            ));
        }

        self.color_space.validate()
    }
}

/// Builder for `ColorizerConfig`
#[derive(Debug, Default)]
pub struct ColorizerConfigBuilder {
    config: ColorizerConfig,
}

impl ColorizerConfigBuilder {
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn num_colors(mut self, num_colors: usize) -> Self {
        self.config.num_colors = num_colors;
        self
    }

    #[must_use]
    pub fn digits(mut self, digits: usize) -> Self {
        self.config.digits = digits;
        self
    }

    #[must_use]
    pub fn add_disturbance(mut self, enabled: bool) -> Self {
        self.config.add_disturbance = enabled;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: BatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    #[must_use]
    pub fn color_space(mut self, color_space: ColorSpaceConfig) -> Self {
        self.config.color_space = color_space;
        self
    }

    #[must_use]
    pub fn divisions(mut self, divisions: usize) -> Self {
        self.config.color_space.divisions = divisions;
        self
    }

    #[must_use]
    pub fn saturation_range(mut self, min: f64, max: f64) -> Self {
        self.config.color_space.saturation = (min, max);
        self
    }

    #[must_use]
    pub fn lightness_range(mut self, min: f64, max: f64) -> Self {
        self.config.color_space.lightness = (min, max);
        self
    }

    #[must_use]
    pub fn copy_input_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.config.copy_input_dir = dir.map(Into::into);
        self
    }

    #[must_use]
    pub fn copy_output_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.config.copy_output_dir = dir.map(Into::into);
        self
    }

    #[must_use]
    pub fn allow_opaque(mut self, allow: bool) -> Self {
        self.config.allow_opaque = allow;
        self
    }

    #[must_use]
    pub fn write_manifest(mut self, enabled: bool) -> Self {
        self.config.write_manifest = enabled;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// - Any rule checked by [`ColorizerConfig::validate`]
    pub fn build(self) -> Result<ColorizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ColorizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.digits, 4);
        assert_eq!(config.mode, BatchMode::PerInput);
        assert_eq!(config.color_space.divisions, 8);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = ColorizerConfig::builder()
            .output_dir("/tmp/out")
            .num_colors(10)
            .digits(6)
            .add_disturbance(true)
            .mode(BatchMode::Cycle)
            .divisions(4)
            .saturation_range(0.2, 0.9)
            .lightness_range(0.1, 0.8)
            .copy_input_dir(Some("/tmp/in_copy"))
            .copy_output_dir(None::<PathBuf>)
            .seed(Some(42))
            .build()
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.num_colors, 10);
        assert_eq!(config.digits, 6);
        assert!(config.add_disturbance);
        assert_eq!(config.mode, BatchMode::Cycle);
        assert_eq!(config.color_space.divisions, 4);
        assert_eq!(config.color_space.saturation, (0.2, 0.9));
        assert_eq!(config.copy_input_dir, Some(PathBuf::from("/tmp/in_copy")));
        assert_eq!(config.copy_output_dir, None);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_zero_colors_rejected() {
        let err = ColorizerConfig::builder().num_colors(0).build().unwrap_err();
        assert!(err.to_string().contains("num_colors"));
    }

    #[test]
    fn test_palette_size_is_capped() {
        assert!(ColorizerConfig::builder()
            .num_colors(MAX_NUM_COLORS)
            .build()
            .is_ok());
        for num_colors in [MAX_NUM_COLORS + 1, 1_000_000_000_000, usize::MAX] {
            let err = ColorizerConfig::builder()
                .num_colors(num_colors)
                .build()
                .unwrap_err();
            assert!(err.to_string().contains("num_colors"));
        }
    }

    #[test]
    fn test_digit_bounds() {
        assert!(ColorizerConfig::builder().digits(0).build().is_err());
        assert!(ColorizerConfig::builder().digits(1).build().is_ok());
        assert!(ColorizerConfig::builder().digits(MAX_DIGITS).build().is_ok());

        let err = ColorizerConfig::builder()
            .digits(MAX_DIGITS + 1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("digits"));
        assert!(err.to_string().contains("Recommended: 4"));
    }

    #[test]
    fn test_color_space_validation() {
        assert!(ColorizerConfig::builder().divisions(0).build().is_err());
        assert!(ColorizerConfig::builder().divisions(MAX_DIVISIONS).build().is_ok());
        assert!(ColorizerConfig::builder()
            .divisions(MAX_DIVISIONS + 1)
            .build()
            .is_err());
        assert!(ColorizerConfig::builder()
            .saturation_range(0.8, 0.2)
            .build()
            .is_err());
        assert!(ColorizerConfig::builder()
            .lightness_range(0.0, 1.5)
            .build()
            .is_err());
        assert!(ColorizerConfig::builder()
            .lightness_range(0.5, 0.5)
            .build()
            .is_ok());
    }
}
