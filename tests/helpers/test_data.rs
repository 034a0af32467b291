//! Test data builders in the backend's document shape

use serde_json::{json, Value};

pub const GROUP_ID: &str = "g1";

pub fn group_doc(id: &str, name: &str, description: &str) -> Value {
    json!({
        "_id": id,
        "_creationTime": 1_700_000_000_000.0,
        "name": name,
        "description": description,
        "icon_url": format!("https://img.example/{}.png", id)
    })
}

pub fn message_doc(id: &str, group_id: &str, user: &str, content: &str) -> Value {
    json!({
        "_id": id,
        "_creationTime": 1_700_000_000_000.0,
        "group_id": group_id,
        "user": user,
        "content": content
    })
}

pub fn image_message_doc(id: &str, group_id: &str, user: &str, file: &str) -> Value {
    json!({
        "_id": id,
        "_creationTime": 1_700_000_000_000.0,
        "group_id": group_id,
        "user": user,
        "content": "",
        "file": file
    })
}

/// A few bytes starting with the PNG signature
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01]
}
