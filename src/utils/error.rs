use thiserror::Error;

/// Errors raised at the crate's I/O and parsing boundaries.
///
/// The per-frame operations never return these: a frame without a usable MRZ
/// is reported as `None` so the caller simply keeps scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<image::ImageError> for ScanError {
    fn from(err: image::ImageError) -> Self {
        ScanError::ImageProcessingError(err.to_string())
    }
}
