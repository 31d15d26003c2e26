//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::{BatchMode, ColorizerConfig};
use anyhow::{Context, Result};

/// Convert CLI arguments to a validated [`ColorizerConfig`]
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build ColorizerConfig from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<ColorizerConfig> {
        let mode = if cli.cycle_inputs {
            BatchMode::Cycle
        } else {
            BatchMode::PerInput
        };

        let config = ColorizerConfig::builder()
            .output_dir(&cli.output_dir)
            .num_colors(cli.num_colors)
            .digits(cli.digits)
            .add_disturbance(cli.add_disturbance)
            .mode(mode)
            .divisions(cli.divisions)
            .saturation_range(cli.min_saturation, cli.max_saturation)
            .lightness_range(cli.min_lightness, cli.max_lightness)
            .copy_input_dir(cli.copy_input_dir.as_ref())
            .copy_output_dir(cli.copy_output_dir.as_ref())
            .allow_opaque(cli.allow_opaque)
            .write_manifest(cli.manifest)
            .seed(cli.seed)
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments that the library config does not cover
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if !cli.input_dir.is_dir() {
            anyhow::bail!(
                "Input path does not exist or is not a directory: {}",
                cli.input_dir.display()
            );
        }

        if cli.output_dir.is_file() {
            anyhow::bail!(
                "Output path exists and is a file, not a directory: {}",
                cli.output_dir.display()
            );
        }

        if let Some(pattern) = &cli.pattern {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid file pattern: {pattern}"))?;
        }

        Ok(())
    }
}
