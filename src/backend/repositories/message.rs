//! Message repository implementation

use serde_json::json;
use crate::backend::connection::BackendConnection;
use crate::models::group::GroupId;
use crate::models::message::{Message, SendMessageRequest};
use crate::utils::errors::BackendResult;

#[derive(Debug, Clone)]
pub struct MessageRepository {
    connection: BackendConnection,
}

impl MessageRepository {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }

    /// Messages of a group in insertion order
    pub async fn list_for_group(&self, group_id: &GroupId) -> BackendResult<Vec<Message>> {
        self.connection.query("messages:get", &json!({ "chatId": group_id })).await
    }

    /// The mutation's return value is not used
    pub async fn send(&self, request: &SendMessageRequest) -> BackendResult<()> {
        let _: serde_json::Value = self.connection.mutation("messages:sendMessage", request).await?;
        Ok(())
    }
}
