//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub chat: ChatConfig,
}

/// Remote backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Deployment URL serving `/api/query`, `/api/mutation` and `/api/action`
    pub url: String,
    /// HTTP actions site URL hosting the image upload route
    pub site_url: String,
    pub upload_path: String,
    /// No timeout is applied when unset
    pub request_timeout_seconds: Option<u64>,
    pub poll_interval_ms: u64,
}

/// Device-local storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: String,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stderr only when unset
    pub file_path: Option<String>,
}

/// Chat behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    pub anonymous_name: String,
    pub scroll_delay_ms: u64,
    pub avatar_base_url: String,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("GROUPCHAT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ChatError> {
        super::validation::validate_settings(self)
    }

    /// Full URL of the image upload endpoint
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}",
            self.backend.site_url.trim_end_matches('/'),
            self.backend.upload_path.trim_start_matches('/')
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: "http://127.0.0.1:3210".to_string(),
                site_url: "http://127.0.0.1:3211".to_string(),
                upload_path: "/sendImage".to_string(),
                request_timeout_seconds: None,
                poll_interval_ms: 1000,
            },
            storage: StorageConfig {
                path: ".groupchat/storage.json".to_string(),
            },
            i18n: I18nConfig {
                default_language: "pt".to_string(),
                supported_languages: vec!["pt".to_string(), "en".to_string()],
                translations_dir: "translations".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
            chat: ChatConfig {
                anonymous_name: "Anônimo".to_string(),
                scroll_delay_ms: 300,
                avatar_base_url: "https://api.dicebear.com/9.x/big-smile/png".to_string(),
            },
        }
    }
}
