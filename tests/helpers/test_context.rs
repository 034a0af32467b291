//! Test context for unified test setup
//!
//! Starts a mock deployment and builds settings, storage and a session that
//! point at it.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use groupchat::{
    backend::{ChatBackend, ConvexBackend},
    config::Settings,
    models::{Identity, LocalImage},
    services::ServiceFactory,
    state::{IdentityResolver, LocalStorage, SessionContext},
    I18n,
};

use super::{convex_mock::ConvexMockServer, convex_mock::UPLOAD_PATH, test_data::png_bytes};

pub struct TestContext {
    pub convex: ConvexMockServer,
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let convex = ConvexMockServer::new().await;
        let settings = Self::create_test_settings(&convex, &temp_dir);

        Self {
            convex,
            settings,
            temp_dir,
        }
    }

    fn create_test_settings(convex: &ConvexMockServer, temp_dir: &TempDir) -> Settings {
        let mut settings = Settings::default();

        settings.backend.url = convex.uri();
        settings.backend.site_url = convex.uri();
        settings.backend.upload_path = UPLOAD_PATH.to_string();
        settings.backend.poll_interval_ms = 20;
        settings.backend.request_timeout_seconds = Some(5);

        settings.storage.path = temp_dir.path().join("storage.json").display().to_string();
        settings.i18n.translations_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/translations").to_string();
        settings.chat.scroll_delay_ms = 20;

        settings
    }

    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        Arc::new(ConvexBackend::from_settings(&self.settings).expect("backend from settings"))
    }

    pub fn storage(&self) -> LocalStorage {
        LocalStorage::from_config(&self.settings.storage)
    }

    /// A fresh resolver over the same storage file, as after an app restart
    pub fn resolver(&self) -> IdentityResolver {
        IdentityResolver::new(self.storage(), self.settings.chat.anonymous_name.clone())
    }

    pub async fn i18n(&self) -> Arc<I18n> {
        let mut i18n = I18n::new(&self.settings.i18n);
        i18n.load_translations().await.expect("bundled translations");
        Arc::new(i18n)
    }

    pub async fn session(&self, identity: &str) -> SessionContext {
        let services = Arc::new(ServiceFactory::new(self.backend(), &self.settings));
        SessionContext::new(
            self.settings.clone(),
            Identity::new(identity),
            services,
            self.i18n().await,
            "pt",
        )
    }

    /// Write a small PNG into the temp dir and return it as a staged image
    pub fn write_image(&self, name: &str) -> LocalImage {
        let path: PathBuf = self.temp_dir.path().join(name);
        std::fs::write(&path, png_bytes()).expect("write image");
        LocalImage::from_path(path)
    }
}
