//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured before any
//! handler is registered.

use url::Url;

use super::Settings;
use crate::utils::errors::{Result, SnapTextError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_server_config(&settings.server)?;
    validate_ocr_config(&settings.ocr)?;
    validate_download_config(&settings.download)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(SnapTextError::Config(
            "Bot token is required. Set BOT_TOKEN or SNAPTEXT_BOT__TOKEN".to_string(),
        ));
    }

    if let Some(url) = &config.webhook_url {
        let parsed = Url::parse(url)
            .map_err(|e| SnapTextError::Config(format!("Invalid webhook URL {url}: {e}")))?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(SnapTextError::Config(format!(
                "Webhook URL must be http(s), got {}",
                parsed.scheme()
            )));
        }
    }

    if config.max_file_size == 0 {
        return Err(SnapTextError::Config(
            "Max file size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    config.listen_addr()?;
    Ok(())
}

/// Validate OCR engine configuration
fn validate_ocr_config(config: &super::OcrConfig) -> Result<()> {
    if config.languages.is_empty() {
        return Err(SnapTextError::Config(
            "At least one OCR language is required".to_string(),
        ));
    }

    if config.languages.iter().any(|lang| lang.is_empty() || lang.contains('+')) {
        return Err(SnapTextError::Config(
            "OCR languages must be plain Tesseract language codes".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(SnapTextError::Config(
            "OCR timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate download configuration
fn validate_download_config(config: &super::DownloadConfig) -> Result<()> {
    if config.timeout_seconds == 0 {
        return Err(SnapTextError::Config(
            "Download timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SnapTextError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SnapTextError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
