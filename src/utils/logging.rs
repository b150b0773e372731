//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the SnapText application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the worker guard for the file appender when file logging is
/// enabled; the guard must stay alive for the process lifetime or buffered
/// lines are lost on shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    let guard = if let Some(directory) = &config.directory {
        let file_appender = tracing_appender::rolling::daily(directory, "snaptext.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
        Some(guard)
    } else {
        registry.init();
        None
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed extraction with structured data
pub fn log_extraction(user_id: i64, chars: usize, duration_ms: u128) {
    info!(
        user_id = user_id,
        chars = chars,
        duration_ms = duration_ms,
        "Extraction completed"
    );
}

/// Log an extraction that ended in a user-visible failure reply
pub fn log_extraction_failed(user_id: i64, error: &str) {
    warn!(user_id = user_id, error = error, "Extraction failed");
}

/// Log an update that matched no handler and was dropped
pub fn log_dropped_update(chat_id: i64, reason: &str) {
    debug!(chat_id = chat_id, reason = reason, "Update dropped");
}
