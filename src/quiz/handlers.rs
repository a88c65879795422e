use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::quiz::dto::{QuizAnswerItem, QuizAnswersResponse, SaveQuizRequest, SaveQuizResponse};
use crate::quiz::repo;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn save_quiz(
    State(state): State<AppState>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<Json<SaveQuizResponse>, (StatusCode, String)> {
    if payload.answers.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "User ID and answers are required".into(),
        ));
    }

    let answers: Vec<(String, String)> = payload
        .answers
        .iter()
        .map(|a| (a.question_id.clone(), a.answer_text()))
        .collect();

    repo::save_answers(&state.db, payload.user_id, &answers)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %payload.user_id, "save quiz failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        })?;

    info!(user_id = %payload.user_id, answers = answers.len(), "quiz answers saved");
    Ok(Json(SaveQuizResponse {
        message: "Quiz results saved successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<QuizAnswersResponse>, (StatusCode, String)> {
    let rows = repo::list_answers(&state.db, user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "get quiz failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    })?;

    let answers = rows
        .into_iter()
        .map(|(question_id, answer)| QuizAnswerItem {
            question_id,
            answer,
        })
        .collect();

    Ok(Json(QuizAnswersResponse { answers }))
}
