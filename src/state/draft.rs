//! Draft state of an open thread

use crate::models::message::LocalImage;

/// Where the composer is in its send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    /// Plain message mutation in flight
    Sending,
    /// Image upload in flight; the UI shows a blocking busy overlay
    Uploading,
}

impl SendState {
    pub fn is_idle(self) -> bool {
        self == SendState::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SendState::Idle => "idle",
            SendState::Sending => "sending",
            SendState::Uploading => "uploading",
        }
    }
}

impl std::fmt::Display for SendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composed text and staged attachment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub text: String,
    pub image: Option<LocalImage>,
}

impl DraftState {
    /// Whether the send control is enabled
    pub fn can_send(&self) -> bool {
        !self.text.is_empty() || self.image.is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.image = None;
    }
}
