use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One answer as submitted by the client. Multi-select questions arrive as
/// JSON arrays, so `answer` accepts any JSON value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswerInput {
    pub question_id: String,
    pub answer: serde_json::Value,
}

impl QuizAnswerInput {
    /// Text form stored in the database: strings pass through unchanged,
    /// everything else is stored as its JSON text.
    pub fn answer_text(&self) -> String {
        match &self.answer {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizRequest {
    pub user_id: Uuid,
    pub answers: Vec<QuizAnswerInput>,
}

#[derive(Debug, Serialize)]
pub struct SaveQuizResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswerItem {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuizAnswersResponse {
    pub answers: Vec<QuizAnswerItem>,
}
