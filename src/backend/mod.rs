//! Backend module
//!
//! This module handles the connection to the remote chat backend and exposes
//! the operations the client relies on through the [`ChatBackend`] trait.

pub mod connection;
pub mod repositories;
pub mod service;
pub mod subscription;
pub mod upload;

use async_trait::async_trait;
use crate::models::{CreateGroupRequest, Group, GroupId, ImageUpload, Message, SendMessageRequest};
use crate::utils::errors::BackendResult;

// Re-export commonly used backend components
pub use connection::{BackendConnection, FunctionKind, create_client};
pub use repositories::{GroupRepository, MessageRepository, GreetingRepository};
pub use service::ConvexBackend;
pub use subscription::{Subscription, watch_groups, watch_messages};
pub use upload::ImageUploader;

/// Remote operations available to the client
///
/// Every call is an independent request/response round trip. Freshness of
/// lists is obtained through [`subscription`] streams built on top of these.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn list_groups(&self) -> BackendResult<Vec<Group>>;

    async fn create_group(&self, request: CreateGroupRequest) -> BackendResult<GroupId>;

    async fn get_group(&self, id: &GroupId) -> BackendResult<Option<Group>>;

    async fn get_messages(&self, group_id: &GroupId) -> BackendResult<Vec<Message>>;

    async fn send_message(&self, request: SendMessageRequest) -> BackendResult<()>;

    async fn get_greeting(&self, name: &str) -> BackendResult<String>;

    async fn upload_image(&self, upload: ImageUpload) -> BackendResult<()>;
}
