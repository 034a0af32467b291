//! GroupChat client
//!
//! Client core for a group chat backed by a reactive Convex deployment.
//! This library provides the backend client, live subscriptions, the message
//! send/upload flow and the view models a front end renders, with
//! multi-language UI strings.

pub mod config;
pub mod backend;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ChatError, BackendError, Result};

// Re-export main components for easy access
pub use backend::{ChatBackend, ConvexBackend};
pub use services::{MessageComposer, ServiceFactory};
pub use state::{LocalStorage, SessionContext};
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
