//! Chat module — `POST /api/chat` endpoint.
//!
//! ```text
//! Request body
//!   → Validate (JSON, non-empty `question`)
//!   → Load knowledge base
//!   → Build prompt (system instruction + knowledge + question)
//!   → Call the generation service once
//!   → Return `{answer}` or `{error, details}`
//! ```

pub mod handler;
pub mod prompt;
pub mod service;

pub use handler::{chat_handler, ChatRequest, ChatResponse};
pub use service::ChatService;
