//! Thread view handler
//!
//! Maps message snapshots to chat bubbles and keeps the list scrolled to the
//! newest entry.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use crate::i18n::I18n;
use crate::models::{Identity, Message};
use crate::utils::helpers::{avatar_url, format_message_time};

/// Which side a bubble is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Own,
    Other,
}

/// One rendered message
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub message_id: String,
    pub ownership: Ownership,
    /// `None` when the message is image-only
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub caption: String,
    /// Send time as `HH:MM`
    pub sent_at: String,
    /// Generated avatar, shown for other people's messages only
    pub avatar_url: Option<String>,
}

/// Ownership is a plain string comparison against the local display name,
/// not an authenticated check.
pub fn ownership(identity: &Identity, message: &Message) -> Ownership {
    if identity.owns(&message.author) {
        Ownership::Own
    } else {
        Ownership::Other
    }
}

pub struct MessageListRenderer {
    identity: Identity,
    i18n: Arc<I18n>,
    language: String,
    avatar_base_url: String,
}

impl MessageListRenderer {
    pub fn new(identity: Identity, i18n: Arc<I18n>, language: impl Into<String>, avatar_base_url: impl Into<String>) -> Self {
        Self {
            identity,
            i18n,
            language: language.into(),
            avatar_base_url: avatar_base_url.into(),
        }
    }

    /// Render a snapshot, keeping backend order
    pub fn render(&self, messages: &[Message]) -> Vec<Bubble> {
        messages.iter().map(|message| self.render_one(message)).collect()
    }

    pub fn render_one(&self, message: &Message) -> Bubble {
        let ownership = ownership(&self.identity, message);
        let (caption, avatar) = match ownership {
            Ownership::Own => (self.i18n.t("thread.sent_by_me", &self.language, None), None),
            Ownership::Other => (
                self.i18n.t_with("thread.sent_by", &self.language, "user", &message.author),
                avatar_url(&self.avatar_base_url, &message.author),
            ),
        };

        Bubble {
            message_id: message.id.clone(),
            ownership,
            text: message.has_text().then(|| message.content.clone()),
            image_url: message.image_url.clone(),
            caption,
            sent_at: format_message_time(message.created_at()),
            avatar_url: avatar,
        }
    }
}

/// Delayed scroll-to-end after each list update
///
/// The delay lets layout settle. A newer update replaces a scroll that has not
/// fired yet, so only the latest update scrolls.
pub struct AutoScroll {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutoScroll {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `scroll` to run after the delay
    pub fn schedule<F>(&self, scroll: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scroll();
        });

        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for AutoScroll {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
