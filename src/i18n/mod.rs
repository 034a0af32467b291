//! Internationalization module
//!
//! This module handles multi-language support for the chat client.
//! It provides translation loading, language detection and message formatting
//! for the Portuguese and English UI strings.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
