//! Data models module
//!
//! This module contains all data structures used throughout the client

pub mod group;
pub mod message;
pub mod identity;

// Re-export commonly used models
pub use group::{Group, GroupId, CreateGroupRequest};
pub use message::{Message, SendMessageRequest, LocalImage, ImageUpload};
pub use identity::{Identity, IdentityChoice};
