//! Extraction Error Types

use thiserror::Error;

/// Errors raised while turning an encoded plot image into points
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// Input bytes could not be decoded as an image
    #[error("Failed to decode plot image: {0}")]
    ImageLoad(String),
}

impl From<image::ImageError> for ExtractionError {
    fn from(err: image::ImageError) -> Self {
        ExtractionError::ImageLoad(err.to_string())
    }
}
