//! How a chat session reaches the endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::ChatRequest;

/// The call did not yield a readable reply.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, reset, DNS failure and the like.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered, but not with JSON.
    #[error("could not decode reply: {0}")]
    Decode(String),
}

/// Whatever JSON the endpoint returned, success or not.
///
/// Status codes are not inspected: a reply without `answer` is handled the
/// same way whether it came with 200 or 500.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ChatReply {
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            ..Self::default()
        }
    }
}

/// Sends one question and returns the raw reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, question: &str) -> Result<ChatReply, TransportError>;
}

/// Posts `{question}` to `{base_url}/api/chat`.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, question: &str) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                question: question.to_string(),
            })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if !status.is_success() {
            log::warn!(
                "chat endpoint returned {}: {}",
                status,
                reply.details.as_deref().or(reply.error.as_deref()).unwrap_or("")
            );
        }
        Ok(reply)
    }
}
