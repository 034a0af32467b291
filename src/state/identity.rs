//! Identity resolution
//!
//! Resolves the display name for this device once per session. A stored name is
//! reused silently; otherwise the presentation layer is asked to prompt, and the
//! answer is persisted for all later sessions.

use tracing::warn;
use crate::models::identity::{Identity, IdentityChoice};
use crate::state::storage::LocalStorage;
use crate::utils::errors::{ChatError, Result};
use crate::utils::logging;

/// Storage key holding the display name
pub const IDENTITY_KEY: &str = "user";

/// Outcome of looking up the stored identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolution {
    Resolved(Identity),
    PromptRequired,
}

#[derive(Debug, Clone)]
pub struct IdentityResolver {
    storage: LocalStorage,
    anonymous_name: String,
}

impl IdentityResolver {
    pub fn new(storage: LocalStorage, anonymous_name: impl Into<String>) -> Self {
        Self {
            storage,
            anonymous_name: anonymous_name.into(),
        }
    }

    /// Look up the stored name. Read failures are treated as "not set".
    pub async fn resolve(&self) -> IdentityResolution {
        match self.storage.get_item(IDENTITY_KEY).await {
            Ok(Some(name)) if !name.is_empty() => {
                logging::log_identity_resolved(&name, "storage");
                IdentityResolution::Resolved(Identity::new(name))
            }
            Ok(_) => IdentityResolution::PromptRequired,
            Err(e) => {
                warn!(error = %e, "Could not read stored identity, prompting again");
                IdentityResolution::PromptRequired
            }
        }
    }

    /// Persist the answer to the first-run prompt
    pub async fn choose(&self, choice: IdentityChoice) -> Result<Identity> {
        let (name, source) = match choice {
            IdentityChoice::Named(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ChatError::InvalidInput("Display name cannot be empty".to_string()));
                }
                (trimmed.to_string(), "prompt")
            }
            IdentityChoice::Anonymous => (self.anonymous_name.clone(), "anonymous"),
        };

        self.storage.set_item(IDENTITY_KEY, &name).await?;
        logging::log_identity_resolved(&name, source);
        Ok(Identity::new(name))
    }

    pub fn anonymous_name(&self) -> &str {
        &self.anonymous_name
    }
}
