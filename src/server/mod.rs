//! HTTP server for the portfolio chat.
//!
//! # Endpoints
//!
//! - `GET  /`         — Chat page
//! - `GET  /health`   — Liveness probe
//! - `POST /api/chat` — Answer a question

pub mod routes;

pub use routes::{app_router, AppState};
