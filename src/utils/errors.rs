//! Error handling for SnapText
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Every failure inside a
//! handler is converted to one of these variants so the handler boundary
//! can map it to the right user-facing reply.

use thiserror::Error;

/// Main error type for the SnapText application
#[derive(Error, Debug)]
pub enum SnapTextError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("File exceeds the configured size limit ({size} > {limit} bytes)")]
    FileTooLarge { size: u32, limit: u32 },

    #[error("Download timed out after {0:?}")]
    DownloadTimeout(std::time::Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// OCR engine specific errors
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("failed to launch OCR binary `{binary}`: {source}")]
    Launch {
        binary: String,
        source: std::io::Error,
    },

    #[error("OCR engine exited with an error: {0}")]
    Failed(String),

    #[error("OCR recognition timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("OCR output is not valid UTF-8")]
    InvalidOutput,

    #[error("I/O error while talking to the OCR engine: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SnapText operations
pub type Result<T> = std::result::Result<T, SnapTextError>;

impl SnapTextError {
    /// Whether processing can continue with the next update after this
    /// error. Configuration problems cannot be recovered at runtime.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SnapTextError::Config(_) => false,
            SnapTextError::ConfigLoad(_) => false,
            SnapTextError::UrlParse(_) => false,
            SnapTextError::Telegram(_) => true,
            SnapTextError::Http(_) => true,
            SnapTextError::Decode(_) => true,
            SnapTextError::Ocr(_) => true,
            SnapTextError::FileTooLarge { .. } => true,
            SnapTextError::DownloadTimeout(_) => true,
            SnapTextError::Io(_) => true,
            SnapTextError::InvalidInput(_) => false,
        }
    }
}
