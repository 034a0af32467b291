//! Local identity model

use serde::{Deserialize, Serialize};

/// Display name representing this device's user
///
/// There is no authentication behind it; any string is accepted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a message author string belongs to this identity (exact, case-sensitive)
    pub fn owns(&self, author: &str) -> bool {
        self.0 == author
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer given to the first-run name prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityChoice {
    Named(String),
    Anonymous,
}
