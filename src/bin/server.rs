//! portfolio-chat HTTP server binary.
//!
//! Serves the chat page and `POST /api/chat`.
//!
//! # Environment Variables
//!
//! See [`portfolio_chat::config`]. In addition:
//!
//! - `RUST_LOG` — Tracing filter (default: "info,portfolio_chat=debug")
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use portfolio_chat::config::AppConfig;
use portfolio_chat::knowledge::source;
use portfolio_chat::llms::GeminiCompletion;
use portfolio_chat::server::{app_router, AppState};
use portfolio_chat::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portfolio_chat=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut gemini = GeminiCompletion::new(&config.gemini_model, &config.gemini_api_key)
        .with_base_url(&config.gemini_base_url);
    if let Some(timeout) = config.gemini_timeout {
        gemini = gemini
            .with_timeout(timeout)
            .context("failed to build Gemini HTTP client")?;
    }

    let knowledge = source::from_config(&config.knowledge);
    tracing::info!(source = %knowledge.source_name(), "knowledge base source");

    let service = ChatService::new(knowledge, Arc::new(gemini), &config.owner);
    let app = app_router(AppState::new(service));

    let bind_addr = config.bind_addr();
    tracing::info!("portfolio-chat server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /         — chat page");
    tracing::info!("  GET  /health   — liveness probe");
    tracing::info!("  POST /api/chat — ask a question");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
