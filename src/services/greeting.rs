//! Greeting fetcher

use std::sync::Arc;
use tracing::{debug, warn};
use crate::backend::ChatBackend;
use crate::models::Identity;

/// Holds the greeting line shown under the directory
pub struct GreetingFetcher {
    backend: Arc<dyn ChatBackend>,
    greeting: String,
}

impl GreetingFetcher {
    pub fn new(backend: Arc<dyn ChatBackend>, default_greeting: impl Into<String>) -> Self {
        Self {
            backend,
            greeting: default_greeting.into(),
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Ask the backend for a personalized greeting; on failure the previous text stays
    pub async fn refresh(&mut self, identity: &Identity) -> &str {
        match self.backend.get_greeting(identity.as_str()).await {
            Ok(greeting) => {
                debug!(identity = %identity, "Greeting updated");
                self.greeting = greeting;
            }
            Err(e) => {
                warn!(identity = %identity, error = %e, "Greeting request failed, keeping previous text");
            }
        }
        &self.greeting
    }
}
