//! Group directory service
//!
//! Lists groups, creates new ones and routes a selected group to its thread.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use crate::backend::{watch_groups, ChatBackend, Subscription};
use crate::models::{CreateGroupRequest, Group, GroupId};
use crate::utils::errors::{ChatError, Result};

/// Navigation target for a selected group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRoute {
    pub group_id: GroupId,
}

/// Tappable directory row
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub group_id: GroupId,
    pub name: String,
    pub description: String,
    pub icon_url: String,
}

impl From<&Group> for GroupRow {
    fn from(group: &Group) -> Self {
        Self {
            group_id: group.id.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            icon_url: group.icon_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct GroupDirectory {
    backend: Arc<dyn ChatBackend>,
    poll_interval: Duration,
}

impl GroupDirectory {
    pub fn new(backend: Arc<dyn ChatBackend>, poll_interval: Duration) -> Self {
        Self { backend, poll_interval }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups = self.backend.list_groups().await?;
        debug!(count = groups.len(), "Groups listed");
        Ok(groups)
    }

    /// Rows in backend order
    pub fn rows(groups: &[Group]) -> Vec<GroupRow> {
        groups.iter().map(GroupRow::from).collect()
    }

    pub fn open(&self, row: &GroupRow) -> ThreadRoute {
        ThreadRoute {
            group_id: row.group_id.clone(),
        }
    }

    /// Header title of a thread; `None` when the group does not exist
    pub async fn title(&self, group_id: &GroupId) -> Result<Option<String>> {
        Ok(self.backend.get_group(group_id).await?.map(|group| group.name))
    }

    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<GroupId> {
        let request = Self::validate(request)?;
        let id = self.backend.create_group(request.clone()).await?;
        info!(group_id = %id, name = %request.name, "Group created");
        Ok(id)
    }

    /// Live directory snapshots
    pub fn subscribe(&self) -> Subscription<Vec<Group>> {
        watch_groups(Arc::clone(&self.backend), self.poll_interval)
    }

    fn validate(request: CreateGroupRequest) -> Result<CreateGroupRequest> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ChatError::InvalidInput("Group name is required".to_string()));
        }

        let icon_url = request.icon_url.trim().to_string();
        if !icon_url.is_empty() {
            Url::parse(&icon_url)
                .map_err(|e| ChatError::InvalidInput(format!("Invalid icon URL '{}': {}", icon_url, e)))?;
        }

        Ok(CreateGroupRequest {
            name,
            description: request.description.trim().to_string(),
            icon_url,
        })
    }
}
