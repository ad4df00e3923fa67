use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;
use crate::errors::{ParleyError, ParleyResult};

/// Failure modes of a backend call. The controller collapses both variants
/// into one user-visible message; the distinction only reaches the log.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered, but not with what the contract requires:
    /// non-2xx status, non-JSON body, or a body missing the reply field.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Successful `/chat` response. Only `message` is contractually required;
/// the backend also sends role, display name and a timestamp, which are
/// kept when present.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Seam between the controller and the backend, so flows can run against a
/// mock in tests.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError>;
    async fn clear_history(&self) -> Result<(), TransportError>;
}

/// The real thing: two POSTs against the chat backend, with an explicit
/// request timeout and no retries.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> ParleyResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ParleyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&json!({ "message": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Protocol(format!(
                "server returned {status}"
            )));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| TransportError::Protocol(format!("malformed chat reply: {e}")))
    }

    async fn clear_history(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .post(format!("{}/clear", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Protocol(format!(
                "server returned {status}"
            )));
        }

        // The body's shape is not contractual, but it must be valid JSON.
        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Protocol(format!("malformed clear reply: {e}")))?;
        Ok(())
    }
}
