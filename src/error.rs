//! Error types for colorizing operations

use thiserror::Error;

/// Result type alias for colorizing operations
pub type Result<T> = std::result::Result<T, ColorizerError>;

/// Error types for colorizing operations
#[derive(Error, Debug)]
pub enum ColorizerError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input is not a PNG file
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input decodes fine but carries no alpha channel
    #[error("Missing alpha channel: {0}")]
    MissingAlpha(String),

    /// Outputs of this input would overwrite another input's outputs
    #[error("Output name collision: {0}")]
    OutputCollision(String),

    /// Manifest serialization errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ColorizerError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Create a new missing alpha error
    pub fn missing_alpha<S: Into<String>>(msg: S) -> Self {
        Self::MissingAlpha(msg.into())
    }

    /// Create an output collision error naming the input that already owns the names
    pub fn output_collision<P: AsRef<std::path::Path>>(output_prefix: &str, claimed_by: P) -> Self {
        Self::OutputCollision(format!(
            "outputs '{}_*' are already produced from '{}'",
            output_prefix,
            claimed_by.as_ref().display()
        ))
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }
}
