//! Backend connection management
//!
//! A deployment exposes every registered function over plain HTTP: queries at
//! `/api/query`, mutations at `/api/mutation` and actions at `/api/action`.
//! Each call posts `{"path", "args", "format": "json"}` and receives either
//! `{"status": "success", "value"}` or `{"status": "error", "errorMessage"}`.

use std::time::{Duration, Instant};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use crate::config::BackendConfig;
use crate::utils::errors::{BackendError, BackendResult, ChatError, Result};
use crate::utils::logging;

/// Kind of backend function being invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Query,
    Mutation,
    Action,
}

impl FunctionKind {
    fn endpoint(self) -> &'static str {
        match self {
            FunctionKind::Query => "api/query",
            FunctionKind::Mutation => "api/mutation",
            FunctionKind::Action => "api/action",
        }
    }
}

#[derive(Debug, Serialize)]
struct FunctionCall<'a, A: Serialize> {
    path: &'a str,
    args: &'a A,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum FunctionResponse {
    Success {
        value: serde_json::Value,
        #[serde(default, rename = "logLines")]
        log_lines: Vec<String>,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
        #[serde(default, rename = "logLines")]
        log_lines: Vec<String>,
    },
}

/// Shared HTTP connection to one backend deployment
#[derive(Debug, Clone)]
pub struct BackendConnection {
    client: Client,
    base_url: Url,
}

/// Build the HTTP client used for every backend request
pub fn create_client(config: &BackendConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("GroupChat/", env!("CARGO_PKG_VERSION")));
    if let Some(seconds) = config.request_timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder.build().map_err(ChatError::Http)
}

impl BackendConnection {
    pub fn new(client: Client, config: &BackendConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub async fn query<A, T>(&self, path: &str, args: &A) -> BackendResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.call(FunctionKind::Query, path, args).await
    }

    pub async fn mutation<A, T>(&self, path: &str, args: &A) -> BackendResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.call(FunctionKind::Mutation, path, args).await
    }

    pub async fn action<A, T>(&self, path: &str, args: &A) -> BackendResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.call(FunctionKind::Action, path, args).await
    }

    async fn call<A, T>(&self, kind: FunctionKind, path: &str, args: &A) -> BackendResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(kind.endpoint())
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        let started = Instant::now();

        debug!(function = path, kind = ?kind, url = %url, "Calling backend function");

        let result = self.send_call(url, path, args).await;
        logging::log_backend_call(path, started.elapsed().as_millis() as u64, result.is_ok());
        if let Err(ref e) = result {
            logging::log_backend_error(path, &e.to_string(), None);
        }
        result
    }

    async fn send_call<A, T>(&self, url: Url, path: &str, args: &A) -> BackendResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = FunctionCall { path, args, format: "json" };
        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed: FunctionResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, text)));
            }
            Err(e) => return Err(BackendError::InvalidResponse(e.to_string())),
        };

        match parsed {
            FunctionResponse::Success { value, log_lines } => {
                for line in log_lines {
                    debug!(function = path, "backend log: {}", line);
                }
                serde_json::from_value(value).map_err(|e| BackendError::InvalidResponse(e.to_string()))
            }
            FunctionResponse::Error { error_message, log_lines } => {
                for line in log_lines {
                    debug!(function = path, "backend log: {}", line);
                }
                Err(BackendError::FunctionFailed {
                    path: path.to_string(),
                    message: error_message,
                })
            }
        }
    }
}
