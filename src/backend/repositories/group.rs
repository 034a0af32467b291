//! Group repository implementation

use serde_json::json;
use crate::backend::connection::BackendConnection;
use crate::models::group::{Group, GroupId, CreateGroupRequest};
use crate::utils::errors::BackendResult;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    connection: BackendConnection,
}

impl GroupRepository {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }

    /// List all groups in backend order
    pub async fn list(&self) -> BackendResult<Vec<Group>> {
        self.connection.query("groups:get", &json!({})).await
    }

    /// Create a new group, returning its identifier
    pub async fn create(&self, request: &CreateGroupRequest) -> BackendResult<GroupId> {
        self.connection.mutation("groups:create", request).await
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: &GroupId) -> BackendResult<Option<Group>> {
        self.connection.query("groups:getGroup", &json!({ "id": id })).await
    }
}
