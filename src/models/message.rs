//! Message model

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::models::group::GroupId;
use crate::utils::helpers::{from_epoch_millis, image_content_type};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_creationTime", default)]
    pub creation_time: f64,
    pub group_id: GroupId,
    /// Display name of the sender, stored by value
    #[serde(rename = "user")]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Message {
    pub fn created_at(&self) -> DateTime<Utc> {
        from_epoch_millis(self.creation_time)
    }

    pub fn has_text(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Arguments of the plain send mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub group_id: GroupId,
    pub content: String,
    #[serde(rename = "user")]
    pub author: String,
}

/// A device-local image staged for sending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub path: PathBuf,
    pub content_type: String,
}

impl LocalImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = image_content_type(&path).to_string();
        Self { path, content_type }
    }
}

/// Payload of one image upload request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub author: String,
    pub group_id: GroupId,
    pub content: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
