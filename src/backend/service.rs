//! Backend service layer
//!
//! This module provides the HTTP implementation of [`ChatBackend`]

use async_trait::async_trait;
use crate::backend::{BackendConnection, ChatBackend, GreetingRepository, GroupRepository, ImageUploader, MessageRepository};
use crate::config::Settings;
use crate::models::*;
use crate::utils::errors::{BackendResult, Result};

#[derive(Debug, Clone)]
pub struct ConvexBackend {
    pub groups: GroupRepository,
    pub messages: MessageRepository,
    pub greetings: GreetingRepository,
    pub uploads: ImageUploader,
}

impl ConvexBackend {
    pub fn new(connection: BackendConnection, uploads: ImageUploader) -> Self {
        Self {
            groups: GroupRepository::new(connection.clone()),
            messages: MessageRepository::new(connection.clone()),
            greetings: GreetingRepository::new(connection),
            uploads,
        }
    }

    /// Build a backend from settings, sharing one HTTP client
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = super::create_client(&settings.backend)?;
        let connection = BackendConnection::new(client.clone(), &settings.backend)?;
        let uploads = ImageUploader::new(client, settings.upload_url());
        Ok(Self::new(connection, uploads))
    }
}

#[async_trait]
impl ChatBackend for ConvexBackend {
    async fn list_groups(&self) -> BackendResult<Vec<Group>> {
        self.groups.list().await
    }

    async fn create_group(&self, request: CreateGroupRequest) -> BackendResult<GroupId> {
        self.groups.create(&request).await
    }

    async fn get_group(&self, id: &GroupId) -> BackendResult<Option<Group>> {
        self.groups.find_by_id(id).await
    }

    async fn get_messages(&self, group_id: &GroupId) -> BackendResult<Vec<Message>> {
        self.messages.list_for_group(group_id).await
    }

    async fn send_message(&self, request: SendMessageRequest) -> BackendResult<()> {
        self.messages.send(&request).await
    }

    async fn get_greeting(&self, name: &str) -> BackendResult<String> {
        self.greetings.greet(name).await
    }

    async fn upload_image(&self, upload: ImageUpload) -> BackendResult<()> {
        self.uploads.upload(upload).await
    }
}
