//! Error handling for GroupChat
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the GroupChat client
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("A send is already in progress ({state})")]
    SendInProgress { state: String },

    #[error("Nothing to send: message text is empty and no image is staged")]
    EmptyMessage,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors reported by the remote backend or its HTTP transport
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend unavailable")]
    ServiceUnavailable,

    #[error("Backend function {path} failed: {message}")]
    FunctionFailed { path: String, message: String },

    #[error("Image upload rejected with HTTP {status}")]
    UploadRejected { status: u16 },
}

/// Result type alias for GroupChat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Result type alias for raw backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::ServiceUnavailable
        } else {
            BackendError::RequestFailed(e.to_string())
        }
    }
}

impl ChatError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChatError::Backend(BackendError::FunctionFailed { .. }) => false,
            ChatError::Backend(BackendError::InvalidResponse(_)) => false,
            ChatError::Backend(_) => true,
            ChatError::Config(_) => false,
            ChatError::ConfigLoad(_) => false,
            ChatError::Storage(_) => true,
            ChatError::SendInProgress { .. } => true,
            ChatError::EmptyMessage => true,
            ChatError::Http(_) => true,
            ChatError::Serialization(_) => false,
            ChatError::Io(_) => true,
            ChatError::UrlParse(_) => false,
            ChatError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ChatError::Config(_) => ErrorSeverity::Critical,
            ChatError::ConfigLoad(_) => ErrorSeverity::Critical,
            ChatError::SendInProgress { .. } => ErrorSeverity::Info,
            ChatError::EmptyMessage => ErrorSeverity::Info,
            ChatError::InvalidInput(_) => ErrorSeverity::Info,
            ChatError::Storage(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
