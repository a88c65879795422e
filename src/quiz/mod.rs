use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz/save", post(handlers::save_quiz))
        .route("/quiz/:user_id", get(handlers::get_quiz))
}
