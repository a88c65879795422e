use axum::{extract::State, Json};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{AnalyzeRequest, ChatRequest, ChatResponse, RecommendationRequest, StyleRecommendation};
use super::services;

#[instrument(skip(state, payload))]
pub async fn recommendations(
    State(state): State<AppState>,
    Json(payload): Json<RecommendationRequest>,
) -> Json<StyleRecommendation> {
    Json(services::recommend(&state, &payload).await)
}

#[instrument(skip(state, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Json<StyleRecommendation> {
    Json(services::analyze_image(&state, &payload).await)
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(services::chat(&state, &payload).await)
}
