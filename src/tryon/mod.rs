use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};

mod dto;
pub mod handlers;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/try-on", post(handlers::try_on))
        // two full-resolution photos per request
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}
