//! Error types for Carta

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardError>;

/// Main error type for Carta
#[derive(Debug, Error)]
pub enum CardError {
    /// Zero-sized images cannot carry a band; rejected before any drawing
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Measurement failed: {0}")]
    Measurement(#[from] MeasureError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
///
/// These never reach a compositing caller: the resolver turns them into the
/// fallback face and a warning.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Font file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font is missing required table: {0}")]
    MissingTable(&'static str),
}

/// Errors raised while measuring or rasterizing a string
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("Font resource became unreadable: {0}")]
    InvalidFont(String),

    #[error("Rasterization failed: {0}")]
    Rasterize(String),
}

/// Codec errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image decoding failed: {0}")]
    Decode(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),
}
