//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GroupChat client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ChatError, ErrorSeverity, Result};

/// Initialize logging based on configuration
///
/// Logs go to stderr so they do not interleave with the shell's output on stdout.
/// When a log directory is configured, a daily rolling file is written as well;
/// the returned guard must stay alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ChatError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let guard = match config.file_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir, "groupchat.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
                .try_init()
                .map_err(|e| ChatError::Config(format!("Logging already initialized: {}", e)))?;
            Some(guard)
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| ChatError::Config(format!("Logging already initialized: {}", e)))?;
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log the identity chosen or restored for this device
pub fn log_identity_resolved(name: &str, source: &str) {
    info!(
        identity = name,
        source = source,
        "Identity resolved"
    );
}

/// Log a plain message send
pub fn log_send(group_id: &str, author: &str, content_len: usize) {
    info!(
        group_id = group_id,
        author = author,
        content_len = content_len,
        "Message sent"
    );
}

/// Log the outcome of an image upload
pub fn log_upload(group_id: &str, author: &str, bytes: usize, success: bool, error: Option<&str>) {
    if success {
        info!(
            group_id = group_id,
            author = author,
            bytes = bytes,
            "Image uploaded"
        );
    } else {
        error!(
            group_id = group_id,
            author = author,
            bytes = bytes,
            error = error,
            "Image upload failed"
        );
    }
}

/// Log backend errors with context
pub fn log_backend_error(function: &str, error: &str, context: Option<&str>) {
    error!(
        function = function,
        error = error,
        context = context,
        "Backend error occurred"
    );
}

/// Log a backend round trip
pub fn log_backend_call(function: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            function = function,
            duration_ms = duration_ms,
            "Backend call completed"
        );
    } else {
        warn!(
            function = function,
            duration_ms = duration_ms,
            "Backend call failed"
        );
    }
}

/// Log a user-facing failure at the level its severity calls for
pub fn log_chat_error(operation: &str, error: &ChatError) {
    let recoverable = error.is_recoverable();
    match error.severity() {
        ErrorSeverity::Info => debug!(operation = operation, error = %error, recoverable, "Operation declined"),
        ErrorSeverity::Warning => warn!(operation = operation, error = %error, recoverable, "Operation failed"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(operation = operation, error = %error, recoverable, "Operation failed")
        }
    }
}
