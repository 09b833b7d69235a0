//! Base LLM trait for text generation.
//!
//! The chat endpoint treats the model as an opaque collaborator: a prompt
//! goes in, generated text (or a [`GenerationError`]) comes out. Providers
//! implement [`BaseLLM`]; tests substitute their own implementations.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status or an error object.
    /// Quota exhaustion surfaces here as status 429.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt was blocked by the provider's safety filters.
    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },

    /// The provider answered 2xx but the body was not usable.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// Interface every text-generation backend implements.
///
/// One method does the work; the accessors exist for logging.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Get the model identifier/name.
    fn model(&self) -> &str;

    /// Get the provider name.
    fn provider(&self) -> &str;

    /// Generate text for `prompt`. Called at most once per chat request.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
