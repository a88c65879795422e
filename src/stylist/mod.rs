use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};

mod dto;
mod fallback;
pub mod handlers;
pub mod prompts;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/style/recommendations", post(handlers::recommendations))
        .route("/style/analyze", post(handlers::analyze))
        .route("/style/chat", post(handlers::chat))
        // photo payloads arrive as base64 data URLs
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}
