//! Configuration management module
//!
//! This module handles loading and validation of application configuration
//! from TOML files and environment variables, and resolves the update
//! delivery mode once at startup.

pub mod settings;
pub mod validation;

pub use settings::{
    BotConfig, DeliveryMode, DownloadConfig, LoggingConfig, MessagesConfig, OcrConfig,
    ServerConfig, Settings,
};
