//! # Portfolio Chat
//!
//! A single-page portfolio assistant. The browser posts a question to
//! `POST /api/chat`; the server loads a static knowledge base, folds it into
//! a prompt and asks Google Gemini for the answer.
//!
//! - [`knowledge`] - Knowledge base loading and rendering
//! - [`chat`] - Prompt construction, the chat pipeline and its HTTP handler
//! - [`llms`] - The generation backend trait and the Gemini provider
//! - [`server`] - Axum router
//! - [`ui`] - Client-side transcript and submission state machine
//! - [`config`] - Environment configuration
//! - [`error`] - Endpoint error type

pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod llms;
pub mod server;
pub mod ui;

pub use chat::ChatService;
pub use config::AppConfig;
pub use error::ChatError;
pub use knowledge::{KnowledgeBase, KnowledgeSource, RenderedKnowledge};
pub use llms::{BaseLLM, GeminiCompletion};
pub use ui::{ChatMessage, ChatSession, Role};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
