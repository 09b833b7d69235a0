//! Endpoint-level error type.
//!
//! Every chat request either yields an answer or a [`ChatError`], which
//! implements [`IntoResponse`] so handlers can return it directly.
//! Client errors are echoed verbatim. Server-side failures are logged in
//! full and answered with a uniform `{error, details}` body; knowledge base
//! failures never expose the file path or parser detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub use crate::config::ConfigError;
pub use crate::knowledge::LoadError;
pub use crate::llms::GenerationError;
pub use crate::ui::transport::TransportError;

/// Client-visible text for invalid JSON bodies.
pub const INVALID_BODY: &str = "Invalid request body";
/// Client-visible text for a missing, empty or non-string question.
pub const INVALID_QUESTION: &str = "Invalid question";
/// `error` field of every 500 response.
pub const INTERNAL_ERROR: &str = "Internal Server Error";
/// `details` field when the knowledge base cannot be loaded.
pub const KNOWLEDGE_LOAD_FAILED: &str = "Failed to load knowledge base";

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// All errors that can end a chat request.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The caller sent an invalid body or question.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The knowledge base could not be loaded.
    #[error("knowledge base error: {0}")]
    Knowledge(#[from] LoadError),

    /// The generation service failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Anything else, e.g. a panicked blocking task.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the client.
    pub fn body(&self) -> ErrorBody {
        match self {
            ChatError::BadRequest(m) => ErrorBody {
                error: m.clone(),
                details: None,
            },
            ChatError::Knowledge(_) => ErrorBody {
                error: INTERNAL_ERROR.to_string(),
                details: Some(KNOWLEDGE_LOAD_FAILED.to_string()),
            },
            ChatError::Generation(e) => ErrorBody {
                error: INTERNAL_ERROR.to_string(),
                details: Some(e.to_string()),
            },
            ChatError::Internal(m) => ErrorBody {
                error: INTERNAL_ERROR.to_string(),
                details: Some(m.clone()),
            },
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match &self {
            ChatError::BadRequest(_) => {}
            ChatError::Knowledge(e) => error!(error = %e, "Error reading knowledge base"),
            ChatError::Generation(e) => error!(error = %e, "Gemini chatbot error"),
            ChatError::Internal(m) => error!(message = %m, "internal server error"),
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bad_request_body() {
        let err = ChatError::BadRequest(INVALID_QUESTION.into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid question" }));
    }

    #[test]
    fn test_knowledge_error_hides_path() {
        let err = ChatError::from(LoadError::Io {
            path: PathBuf::from("/secret/location/kb.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.details.as_deref(), Some("Failed to load knowledge base"));
        assert!(!serde_json::to_string(&body).unwrap().contains("/secret"));
    }

    #[test]
    fn test_generation_error_carries_details() {
        let err = ChatError::from(GenerationError::Api {
            status: 429,
            message: "Quota exceeded".into(),
        });
        let body = err.body();
        assert_eq!(body.error, "Internal Server Error");
        assert!(body.details.unwrap().contains("Quota exceeded"));
    }
}
