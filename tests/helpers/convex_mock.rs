//! Mock Convex deployment for testing
//!
//! Serves the function endpoints (`/api/query`, `/api/mutation`, `/api/action`)
//! and the image upload route with configurable responses, using wiremock.

use std::time::Duration;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockBuilder, MockServer, Request, ResponseTemplate,
};

pub const UPLOAD_PATH: &str = "/sendImage";

/// Mock deployment serving both the API and the site routes
pub struct ConvexMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
        }
    }
}

impl ConvexMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Matcher for one function call; narrow it further with `.and(..)` before responding
    pub fn function(endpoint: &str, function: &str) -> MockBuilder {
        Mock::given(method("POST"))
            .and(path(format!("/api/{}", endpoint)))
            .and(body_partial_json(json!({ "path": function, "format": "json" })))
    }

    /// Success envelope carrying `value`
    pub fn success(value: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "value": value,
            "logLines": []
        }))
    }

    /// Error envelope as returned for a throwing function
    pub fn error_envelope(message: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "errorMessage": message,
            "errorData": null,
            "logLines": []
        }))
    }

    pub async fn mock_query(&self, function: &str, value: Value) {
        Self::function("query", function)
            .respond_with(Self::success(value))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_mutation(&self, function: &str, value: Value) {
        Self::function("mutation", function)
            .respond_with(Self::success(value))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_action(&self, function: &str, value: Value) {
        Self::function("action", function)
            .respond_with(Self::success(value))
            .mount(&self.server)
            .await;
    }

    /// Mock for the image upload route
    pub fn upload(config: MockResponseConfig) -> Mock {
        let mut response = ResponseTemplate::new(config.status);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .respond_with(response)
    }

    /// Requests received so far on one path
    pub async fn requests_to(&self, request_path: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == request_path)
            .collect()
    }

    /// Bodies of the function calls received on one endpoint
    pub async fn function_calls(&self, endpoint: &str) -> Vec<Value> {
        self.requests_to(&format!("/api/{}", endpoint))
            .await
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
