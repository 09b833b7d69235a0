//! Chat handler — `POST /api/chat` endpoint implementation.
//!
//! Validation runs before anything else and fails fast:
//! 1. The body must be JSON, else `400 {"error": "Invalid request body"}`.
//! 2. `question` must be a non-empty string, else `400 {"error": "Invalid question"}`.
//!
//! Bodies the extractor refuses outright (over axum's default 2 MB limit,
//! unreadable streams) are reported as an invalid body too.
//!
//! The rest is delegated to [`ChatService::answer`]; its errors become
//! `500 {"error", "details"}` responses through [`ChatError`].

use std::sync::Arc;

use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::service::ChatService;
use crate::error::{ChatError, INVALID_BODY, INVALID_QUESTION};

// ============================================================================
// Request / Response types
// ============================================================================

/// Incoming chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub question: String,
}

/// Successful chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text.
    pub answer: String,
}

impl ChatRequest {
    /// Validate a raw request body.
    ///
    /// Parsing goes through [`Value`] first so an unparseable body and a
    /// missing or mistyped `question` are reported differently.
    pub fn from_body(body: &[u8]) -> Result<Self, ChatError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| ChatError::BadRequest(INVALID_BODY.to_string()))?;

        match value.get("question").and_then(Value::as_str) {
            Some(question) if !question.is_empty() => Ok(Self {
                question: question.to_string(),
            }),
            _ => Err(ChatError::BadRequest(INVALID_QUESTION.to_string())),
        }
    }
}

// ============================================================================
// Handler
// ============================================================================

/// POST /api/chat — answer one question.
pub async fn chat_handler(
    State(service): State<Arc<ChatService>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(%rejection, "request body rejected");
        ChatError::BadRequest(INVALID_BODY.to_string())
    })?;
    let request = ChatRequest::from_body(&body)?;
    let answer = service.answer(&request.question).await?;
    Ok(Json(ChatResponse { answer }))
}

// ============================================================================
// Tests
// ============================================================================
