//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{ChatError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_storage_config(&settings.storage)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;
    validate_chat_config(&settings.chat)?;

    Ok(())
}

/// Validate backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ChatError::Config(
            "Backend URL is required".to_string()
        ));
    }
    Url::parse(&config.url)
        .map_err(|e| ChatError::Config(format!("Invalid backend URL '{}': {}", config.url, e)))?;

    if config.site_url.is_empty() {
        return Err(ChatError::Config(
            "Backend site URL is required".to_string()
        ));
    }
    Url::parse(&config.site_url)
        .map_err(|e| ChatError::Config(format!("Invalid site URL '{}': {}", config.site_url, e)))?;

    if config.upload_path.is_empty() {
        return Err(ChatError::Config(
            "Upload path is required".to_string()
        ));
    }

    if config.poll_interval_ms == 0 {
        return Err(ChatError::Config(
            "Poll interval must be greater than 0".to_string()
        ));
    }

    if config.request_timeout_seconds == Some(0) {
        return Err(ChatError::Config(
            "Request timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(ChatError::Config(
            "Storage path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(ChatError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(ChatError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(ChatError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ChatError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ChatError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate chat configuration
fn validate_chat_config(config: &super::ChatConfig) -> Result<()> {
    if config.anonymous_name.trim().is_empty() {
        return Err(ChatError::Config(
            "Anonymous display name cannot be empty".to_string()
        ));
    }

    Ok(())
}
