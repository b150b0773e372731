//! SnapText Telegram Bot
//!
//! A Telegram bot that extracts text from user-submitted images using the
//! Tesseract OCR engine. This library provides the configuration layer, the
//! message handlers, the OCR/download/imaging services and the HTTP surface
//! (webhook callback plus liveness endpoints) used by the binary.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{DeliveryMode, Settings};
pub use services::ServiceFactory;
pub use utils::errors::{Result, SnapTextError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
