//! Session context
//!
//! Everything a screen needs once the display name is known. The identity is
//! resolved once at startup and passed here explicitly; nothing reads it from
//! storage again during the session.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{watch_messages, ChatBackend, Subscription};
use crate::config::Settings;
use crate::handlers::thread::{AutoScroll, MessageListRenderer};
use crate::i18n::I18n;
use crate::models::{GroupId, Identity, Message};
use crate::services::{GreetingFetcher, GroupDirectory, Keyboard, MessageComposer, ServiceFactory};

/// Application-wide context for one running session
#[derive(Clone)]
pub struct SessionContext {
    pub settings: Settings,
    pub identity: Identity,
    pub services: Arc<ServiceFactory>,
    pub i18n: Arc<I18n>,
    /// UI language code
    pub language: String,
}

impl SessionContext {
    pub fn new(
        settings: Settings,
        identity: Identity,
        services: Arc<ServiceFactory>,
        i18n: Arc<I18n>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            settings,
            identity,
            services,
            i18n,
            language: language.into(),
        }
    }

    /// Translate a UI string in the session language
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, &self.language, None)
    }

    pub fn t_with(&self, key: &str, name: &str, value: &str) -> String {
        self.i18n.t_with(key, &self.language, name, value)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.settings.backend.poll_interval_ms)
    }

    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        Arc::clone(&self.services.backend)
    }

    pub fn directory(&self) -> &GroupDirectory {
        &self.services.directory
    }

    pub fn greeting_fetcher(&self) -> GreetingFetcher {
        self.services.greeting_fetcher(self.t("directory.greeting_default"))
    }

    /// Composer bound to this session's identity for one thread
    pub fn open_thread(&self, group_id: GroupId, keyboard: Arc<dyn Keyboard>) -> MessageComposer {
        MessageComposer::new(self.backend(), self.identity.clone(), group_id, keyboard)
    }

    pub fn watch_thread(&self, group_id: GroupId) -> Subscription<Vec<Message>> {
        watch_messages(self.backend(), group_id, self.poll_interval())
    }

    pub fn renderer(&self) -> MessageListRenderer {
        MessageListRenderer::new(
            self.identity.clone(),
            Arc::clone(&self.i18n),
            self.language.clone(),
            self.settings.chat.avatar_base_url.clone(),
        )
    }

    pub fn auto_scroll(&self) -> AutoScroll {
        AutoScroll::new(Duration::from_millis(self.settings.chat.scroll_delay_ms))
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("identity", &self.identity)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
