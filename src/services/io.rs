//! Image I/O operations service
//!
//! This module separates file I/O operations from the compositing logic,
//! making the batch driver testable against plain in-memory images.

use crate::error::{ColorizerError, Result};
use image::{ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Service for reading transparent PNGs and writing composites
pub struct ImageIOService;

impl ImageIOService {
    /// Load a PNG that carries an alpha channel
    ///
    /// The format is detected from the file content, not the extension.
    ///
    /// # Errors
    /// - `Io` if the file cannot be opened or read
    /// - `UnsupportedFormat` if the content is not PNG
    /// - `Image` if the PNG fails to decode
    /// - `MissingAlpha` if the image has no alpha channel and `allow_opaque` is false
    pub fn load_transparent_png<P: AsRef<Path>>(path: P, allow_opaque: bool) -> Result<RgbaImage> {
        let path_ref = path.as_ref();

        let file = File::open(path_ref)
            .map_err(|e| ColorizerError::file_io_error("open input image", path_ref, &e))?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| ColorizerError::file_io_error("read input image", path_ref, &e))?;

        match reader.format() {
            Some(ImageFormat::Png) => {},
            Some(other) => {
                return Err(ColorizerError::unsupported_format(format!(
                    "'{}' is {:?}, only PNG input is supported",
                    path_ref.display(),
                    other
                )));
            },
            None => {
                return Err(ColorizerError::unsupported_format(format!(
                    "'{}' is not a recognizable image, only PNG input is supported",
                    path_ref.display()
                )));
            },
        }

        let image = reader.decode()?;
        let color = image.color();

        if !color.has_alpha() {
            if !allow_opaque {
                return Err(ColorizerError::missing_alpha(format!(
                    "'{}' is {:?} without transparency",
                    path_ref.display(),
                    color
                )));
            }
            debug!(
                path = %path_ref.display(),
                color = ?color,
                "Treating opaque input as fully opaque RGBA"
            );
        }

        Ok(image.into_rgba8())
    }

    /// Save a composite as PNG, creating parent directories as needed
    pub fn save_png<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        Self::ensure_parent(path_ref)?;
        image.save_with_format(path_ref, ImageFormat::Png)?;
        Ok(())
    }

    /// Copy a file, creating parent directories as needed
    pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        Self::ensure_parent(to)?;
        std::fs::copy(from, to)
            .map_err(|e| ColorizerError::file_io_error("copy file", from, &e))?;
        Ok(())
    }

    /// Create a directory and its parents
    pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if dir.is_file() {
            return Err(ColorizerError::invalid_config(format!(
                "Output path exists and is a file, not a directory: {}",
                dir.display()
            )));
        }
        std::fs::create_dir_all(dir)
            .map_err(|e| ColorizerError::file_io_error("create directory", dir, &e))
    }

    /// Check if a file path has a `.png` extension, case-insensitively
    pub fn is_png_path<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_PNG_EXTENSION))
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::ensure_dir(parent),
            _ => Ok(()),
        }
    }
}

const OUTPUT_PNG_EXTENSION: &str = crate::naming::OUTPUT_EXTENSION;
