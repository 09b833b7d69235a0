//! Axum route handlers for the portfolio chat server.
//!
//! # Routes
//!
//! - `GET  /`         — The single-page chat UI
//! - `GET  /health`   — Returns `{"status": "ok", "version": ..., "service": ...}`
//! - `POST /api/chat` — Answer one question, see [`crate::chat::handler`]

use std::sync::Arc;

use axum::{
    extract::FromRef,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::{chat_handler, ChatService};

/// The browser UI, compiled into the binary.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared application state for the HTTP server.
///
/// Holds only immutable, shareable values; requests never observe one
/// another.
#[derive(Clone)]
pub struct AppState {
    /// The chat pipeline.
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}

impl FromRef<AppState> for Arc<ChatService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.chat)
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / — the chat page.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "portfolio-chat",
    }))
}
