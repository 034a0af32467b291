//! Message composer
//!
//! Owns the draft of one open thread and commits it either as a plain message
//! (one mutation) or as an image message (one HTTP upload). The send state is
//! explicit: a send is only accepted from `Idle`, and the state always returns to
//! `Idle` once the request settles, including when the send future is dropped.

use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use crate::backend::ChatBackend;
use crate::models::{GroupId, Identity, ImageUpload, LocalImage, SendMessageRequest};
use crate::state::draft::{DraftState, SendState};
use crate::utils::errors::{ChatError, Result};
use crate::utils::helpers::sniff_image_type;
use crate::utils::logging;

/// Hook into the presentation layer's on-screen keyboard
pub trait Keyboard: Send + Sync {
    fn dismiss(&self);
}

/// Keyboard for surfaces without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeyboard;

impl Keyboard for NoKeyboard {
    fn dismiss(&self) {}
}

/// Options passed to the device image picker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickOptions {
    pub allow_multiple: bool,
    /// 1.0 is full quality
    pub quality: f32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            allow_multiple: false,
            quality: 1.0,
        }
    }
}

/// Device image picker; `None` or an empty list means the user cancelled
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self, options: PickOptions) -> Option<Vec<LocalImage>>;
}

/// Result of a send that was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Uploaded,
    /// The upload failed; the draft is kept so the user can retry
    UploadFailed { reason: String },
}

pub struct MessageComposer {
    backend: Arc<dyn ChatBackend>,
    identity: Identity,
    group_id: GroupId,
    keyboard: Arc<dyn Keyboard>,
    draft: Mutex<DraftState>,
    state: watch::Sender<SendState>,
}

/// Puts the composer back to `Idle` when dropped
struct IdleOnDrop<'a> {
    state: &'a watch::Sender<SendState>,
}

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.state.send_replace(SendState::Idle);
    }
}

impl MessageComposer {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        identity: Identity,
        group_id: GroupId,
        keyboard: Arc<dyn Keyboard>,
    ) -> Self {
        let (state, _) = watch::channel(SendState::Idle);
        Self {
            backend,
            identity,
            group_id,
            keyboard,
            draft: Mutex::new(DraftState::default()),
            state,
        }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    fn draft(&self) -> MutexGuard<'_, DraftState> {
        // The draft holds plain data; a panic elsewhere cannot leave it half-written.
        self.draft.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.draft().text = text.into();
    }

    pub fn text(&self) -> String {
        self.draft().text.clone()
    }

    pub fn stage_image(&self, image: LocalImage) {
        debug!(path = %image.path.display(), "Image staged");
        self.draft().image = Some(image);
    }

    pub fn clear_image(&self) {
        self.draft().image = None;
    }

    pub fn staged_image(&self) -> Option<LocalImage> {
        self.draft().image.clone()
    }

    /// Whether the send control should be enabled
    pub fn can_send(&self) -> bool {
        self.state().is_idle() && self.draft().can_send()
    }

    pub fn state(&self) -> SendState {
        *self.state.borrow()
    }

    pub fn is_uploading(&self) -> bool {
        self.state() == SendState::Uploading
    }

    /// Follow state changes, e.g. to show the busy overlay
    pub fn subscribe_state(&self) -> watch::Receiver<SendState> {
        self.state.subscribe()
    }

    /// Ask the picker for one full-quality image and stage the first result
    pub async fn pick_image(&self, picker: &dyn ImagePicker) -> bool {
        match picker.pick(PickOptions::default()).await {
            Some(images) => match images.into_iter().next() {
                Some(image) => {
                    self.stage_image(image);
                    true
                }
                None => false,
            },
            None => {
                debug!("Image picker cancelled");
                false
            }
        }
    }

    /// Commit the current draft
    pub async fn send(&self) -> Result<SendOutcome> {
        self.keyboard.dismiss();

        let (draft, next) = {
            let draft = self.draft();
            let current = *self.state.borrow();
            if !current.is_idle() {
                warn!(group_id = %self.group_id, state = %current, "Send rejected while busy");
                return Err(ChatError::SendInProgress { state: current.to_string() });
            }
            if !draft.can_send() {
                return Err(ChatError::EmptyMessage);
            }
            let next = if draft.image.is_some() { SendState::Uploading } else { SendState::Sending };
            self.state.send_replace(next);
            (draft.clone(), next)
        };
        let _idle = IdleOnDrop { state: &self.state };

        match (next, draft.image) {
            (SendState::Uploading, Some(image)) => Ok(self.upload(draft.text, image).await),
            _ => self.send_text(draft.text).await,
        }
    }

    async fn send_text(&self, content: String) -> Result<SendOutcome> {
        let request = SendMessageRequest {
            group_id: self.group_id.clone(),
            content: content.clone(),
            author: self.identity.as_str().to_string(),
        };

        self.backend.send_message(request).await?;
        logging::log_send(self.group_id.as_str(), self.identity.as_str(), content.len());

        self.draft().text.clear();
        Ok(SendOutcome::Sent)
    }

    async fn upload(&self, content: String, image: LocalImage) -> SendOutcome {
        let bytes = match tokio::fs::read(&image.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let reason = format!("Cannot read {}: {}", image.path.display(), e);
                logging::log_upload(self.group_id.as_str(), self.identity.as_str(), 0, false, Some(&reason));
                return SendOutcome::UploadFailed { reason };
            }
        };
        let size = bytes.len();
        // The file's own bytes win over its extension
        let content_type = sniff_image_type(&bytes)
            .map(str::to_string)
            .unwrap_or_else(|| image.content_type.clone());

        let upload = ImageUpload {
            author: self.identity.as_str().to_string(),
            group_id: self.group_id.clone(),
            content,
            content_type,
            bytes,
        };

        match self.backend.upload_image(upload).await {
            Ok(()) => {
                logging::log_upload(self.group_id.as_str(), self.identity.as_str(), size, true, None);
                self.draft().clear();
                info!(group_id = %self.group_id, "Image message sent");
                SendOutcome::Uploaded
            }
            Err(e) => {
                let reason = e.to_string();
                logging::log_upload(self.group_id.as_str(), self.identity.as_str(), size, false, Some(&reason));
                SendOutcome::UploadFailed { reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use assert_matches::assert_matches;
    use crate::models::{CreateGroupRequest, Group, Message};
    use crate::utils::errors::{BackendError, BackendResult};

    #[derive(Default)]
    struct RecordingBackend {
        sent: Mutex<Vec<SendMessageRequest>>,
        uploads: Mutex<Vec<ImageUpload>>,
        fail_uploads: bool,
        fail_sends: bool,
        state_during_upload: Mutex<Option<watch::Receiver<SendState>>>,
        observed: Mutex<Vec<SendState>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn list_groups(&self) -> BackendResult<Vec<Group>> {
            Ok(vec![])
        }
        async fn create_group(&self, _request: CreateGroupRequest) -> BackendResult<GroupId> {
            Ok(GroupId::new("g-new"))
        }
        async fn get_group(&self, _id: &GroupId) -> BackendResult<Option<Group>> {
            Ok(None)
        }
        async fn get_messages(&self, _group_id: &GroupId) -> BackendResult<Vec<Message>> {
            Ok(vec![])
        }
        async fn send_message(&self, request: SendMessageRequest) -> BackendResult<()> {
            if let Some(rx) = self.state_during_upload.lock().unwrap().as_ref() {
                self.observed.lock().unwrap().push(*rx.borrow());
            }
            self.sent.lock().unwrap().push(request);
            if self.fail_sends {
                return Err(BackendError::ServiceUnavailable);
            }
            Ok(())
        }
        async fn get_greeting(&self, name: &str) -> BackendResult<String> {
            Ok(format!("Hello, {}!", name))
        }
        async fn upload_image(&self, upload: ImageUpload) -> BackendResult<()> {
            if let Some(rx) = self.state_during_upload.lock().unwrap().as_ref() {
                self.observed.lock().unwrap().push(*rx.borrow());
            }
            self.uploads.lock().unwrap().push(upload);
            if self.fail_uploads {
                return Err(BackendError::UploadRejected { status: 500 });
            }
            Ok(())
        }
    }

    struct CountingKeyboard(AtomicUsize);

    impl Keyboard for CountingKeyboard {
        fn dismiss(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FixedPicker(Option<Vec<LocalImage>>);

    #[async_trait]
    impl ImagePicker for FixedPicker {
        async fn pick(&self, options: PickOptions) -> Option<Vec<LocalImage>> {
            assert!(!options.allow_multiple);
            assert_eq!(options.quality, 1.0);
            self.0.clone()
        }
    }

    fn composer(backend: Arc<RecordingBackend>) -> MessageComposer {
        MessageComposer::new(backend, Identity::new("Ana"), GroupId::new("g1"), Arc::new(NoKeyboard))
    }

    fn png_on_disk(dir: &tempfile::TempDir) -> LocalImage {
        let path = dir.path().join("photo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        LocalImage::from_path(path)
    }

    #[tokio::test]
    async fn test_plain_send_issues_one_mutation_and_clears_text() {
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());
        composer.set_text("Oi pessoal");

        let outcome = composer.send().await.unwrap();

        assert_eq!(outcome, SendOutcome::Sent);
        let sent = backend.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], SendMessageRequest {
            group_id: GroupId::new("g1"),
            content: "Oi pessoal".to_string(),
            author: "Ana".to_string(),
        });
        assert_eq!(composer.text(), "");
        assert_eq!(composer.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn test_plain_send_never_raises_uploading() {
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());
        *backend.state_during_upload.lock().unwrap() = Some(composer.subscribe_state());
        composer.set_text("Oi");

        composer.send().await.unwrap();

        assert_eq!(*backend.observed.lock().unwrap(), vec![SendState::Sending]);
        assert!(!composer.is_uploading());
    }

    #[tokio::test]
    async fn test_failed_plain_send_keeps_text() {
        let backend = Arc::new(RecordingBackend { fail_sends: true, ..Default::default() });
        let composer = composer(backend.clone());
        composer.set_text("Oi");

        assert_matches!(composer.send().await, Err(ChatError::Backend(BackendError::ServiceUnavailable)));
        assert_eq!(composer.text(), "Oi");
        assert_eq!(composer.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected_without_network() {
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());

        assert!(!composer.can_send());
        assert_matches!(composer.send().await, Err(ChatError::EmptyMessage));
        assert!(backend.sent.lock().unwrap().is_empty());
        assert!(backend.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_send_is_uploading_during_request() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());
        *backend.state_during_upload.lock().unwrap() = Some(composer.subscribe_state());
        composer.stage_image(png_on_disk(&dir));
        composer.set_text("olha isso");

        assert!(!composer.is_uploading());
        let outcome = composer.send().await.unwrap();

        assert_eq!(outcome, SendOutcome::Uploaded);
        assert_eq!(*backend.observed.lock().unwrap(), vec![SendState::Uploading]);
        assert!(!composer.is_uploading());

        let uploads = backend.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].author, "Ana");
        assert_eq!(uploads[0].content, "olha isso");
        assert_eq!(uploads[0].content_type, "image/png");
        assert_eq!(uploads[0].bytes, vec![0x89, b'P', b'N', b'G']);
        assert!(backend.sent.lock().unwrap().is_empty());

        assert_eq!(composer.text(), "");
        assert!(composer.staged_image().is_none());
    }

    #[tokio::test]
    async fn test_upload_type_comes_from_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_0042");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00]).unwrap();
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());
        let image = LocalImage::from_path(path);
        assert_eq!(image.content_type, "application/octet-stream");
        composer.stage_image(image);

        assert_eq!(composer.send().await.unwrap(), SendOutcome::Uploaded);
        assert_eq!(backend.uploads.lock().unwrap()[0].content_type, "image/png");
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_draft() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(RecordingBackend { fail_uploads: true, ..Default::default() });
        let composer = composer(backend.clone());
        let image = png_on_disk(&dir);
        composer.stage_image(image.clone());
        composer.set_text("olha isso");

        let outcome = composer.send().await.unwrap();

        assert_matches!(outcome, SendOutcome::UploadFailed { .. });
        assert_eq!(composer.text(), "olha isso");
        assert_eq!(composer.staged_image(), Some(image));
        assert_eq!(composer.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn test_unreadable_image_counts_as_failed_upload() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(RecordingBackend::default());
        let composer = composer(backend.clone());
        composer.stage_image(LocalImage::from_path(dir.path().join("missing.jpg")));

        let outcome = composer.send().await.unwrap();

        assert_matches!(outcome, SendOutcome::UploadFailed { .. });
        assert!(backend.uploads.lock().unwrap().is_empty());
        assert!(composer.staged_image().is_some());
        assert_eq!(composer.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn test_keyboard_dismissed_on_every_attempt() {
        let keyboard = Arc::new(CountingKeyboard(AtomicUsize::new(0)));
        let composer = MessageComposer::new(
            Arc::new(RecordingBackend::default()),
            Identity::new("Ana"),
            GroupId::new("g1"),
            keyboard.clone(),
        );

        let _ = composer.send().await;
        composer.set_text("Oi");
        let _ = composer.send().await;

        assert_eq!(keyboard.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_pick_image_takes_first_and_ignores_cancel() {
        let composer = composer(Arc::new(RecordingBackend::default()));

        assert!(!composer.pick_image(&FixedPicker(None)).await);
        assert!(!composer.pick_image(&FixedPicker(Some(vec![]))).await);
        assert!(composer.staged_image().is_none());

        let first = LocalImage::from_path("first.jpg");
        let second = LocalImage::from_path("second.jpg");
        assert!(composer.pick_image(&FixedPicker(Some(vec![first.clone(), second]))).await);
        assert_eq!(composer.staged_image(), Some(first));
    }
}
