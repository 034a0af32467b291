//! Services module
//!
//! This module contains the client-side flows built on top of the backend

pub mod composer;
pub mod directory;
pub mod greeting;

// Re-export commonly used services
pub use composer::{MessageComposer, SendOutcome, Keyboard, NoKeyboard, ImagePicker, PickOptions};
pub use directory::{GroupDirectory, GroupRow, ThreadRoute};
pub use greeting::GreetingFetcher;

use std::sync::Arc;
use std::time::Duration;
use crate::backend::ChatBackend;
use crate::config::settings::Settings;

/// Service factory for creating the session-independent services
#[derive(Clone)]
pub struct ServiceFactory {
    pub backend: Arc<dyn ChatBackend>,
    pub directory: GroupDirectory,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(backend: Arc<dyn ChatBackend>, settings: &Settings) -> Self {
        let directory = GroupDirectory::new(
            Arc::clone(&backend),
            Duration::from_millis(settings.backend.poll_interval_ms),
        );

        Self { backend, directory }
    }

    pub fn greeting_fetcher(&self, default_greeting: impl Into<String>) -> GreetingFetcher {
        GreetingFetcher::new(Arc::clone(&self.backend), default_greeting)
    }
}
