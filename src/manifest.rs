//! JSON record of a colorizing batch

use crate::{
    color::Rgb,
    config::{BatchMode, ColorizerConfig},
    error::{ColorizerError, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One generated image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Output path relative to the output directory
    pub output: PathBuf,
    /// Transparent source image
    pub source: PathBuf,
    pub rgb: [u8; 3],
    pub hex: String,
}

impl ManifestEntry {
    #[must_use]
    pub fn new(output: PathBuf, source: PathBuf, color: Rgb) -> Self {
        Self {
            output,
            source,
            rgb: color.to_array(),
            hex: color.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub mode: BatchMode,
    pub add_disturbance: bool,
    pub num_colors: usize,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    #[must_use]
    pub fn new(config: &ColorizerConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            seed: config.seed,
            mode: config.mode,
            add_disturbance: config.add_disturbance,
            num_colors: config.num_colors,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Serialize as pretty JSON to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| ColorizerError::file_io_error("write manifest", path, &e))
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ColorizerError::file_io_error("read manifest", path, &e))?;
        Ok(serde_json::from_str(&content)?)
    }
}
