//! Image upload endpoint
//!
//! Images are not sent through a mutation. The raw bytes are posted to an HTTP
//! route on the deployment's site URL, with the author, group and caption in the
//! query string; the route stores the file and creates the message server-side.

use std::time::Instant;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use crate::models::message::ImageUpload;
use crate::utils::errors::{BackendError, BackendResult};
use crate::utils::logging;

#[derive(Debug, Clone)]
pub struct ImageUploader {
    client: Client,
    upload_url: String,
}

impl ImageUploader {
    pub fn new(client: Client, upload_url: impl Into<String>) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
        }
    }

    /// Post one image. Any 2xx status counts as success; the body is ignored.
    pub async fn upload(&self, upload: ImageUpload) -> BackendResult<()> {
        let started = Instant::now();
        debug!(
            group_id = %upload.group_id,
            content_type = %upload.content_type,
            bytes = upload.bytes.len(),
            "Uploading image"
        );

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[
                ("user", upload.author.as_str()),
                ("group_id", upload.group_id.as_str()),
                ("content", upload.content.as_str()),
            ])
            .header(CONTENT_TYPE, upload.content_type.as_str())
            .body(upload.bytes)
            .send()
            .await;

        let result = match response {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(BackendError::UploadRejected {
                status: response.status().as_u16(),
            }),
            Err(e) => Err(BackendError::from(e)),
        };

        logging::log_backend_call("upload:sendImage", started.elapsed().as_millis() as u64, result.is_ok());
        result
    }
}
