use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, instrument};

use crate::gemini::{split_image_data_url, GeminiError};
use crate::state::AppState;

use super::dto::{TryOnRequest, TryOnResponse};
use super::services;

#[instrument(skip(state, payload))]
pub async fn try_on(
    State(state): State<AppState>,
    Json(payload): Json<TryOnRequest>,
) -> Result<Json<TryOnResponse>, (StatusCode, String)> {
    let (Some(person), Some(garment)) = (
        split_image_data_url(&payload.person_image),
        split_image_data_url(&payload.garment_image),
    ) else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Person and garment images are required".into(),
        ));
    };

    match services::compose(&state, person, garment).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            error!(error = %e, "try-on failed");
            Err(map_try_on_error(&e))
        }
    }
}

fn map_try_on_error(e: &GeminiError) -> (StatusCode, String) {
    match e.status() {
        Some(429) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Quota exceeded for this model. Please try again later or verify your API plan \
             supports this model."
                .into(),
        ),
        Some(404) => (
            StatusCode::NOT_FOUND,
            "The requested model was not found. Please check the model name.".into(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to process try-on request: {e}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> GeminiError {
        GeminiError::Api {
            status,
            message: "upstream said no".into(),
        }
    }

    #[test]
    fn quota_errors_map_to_429() {
        let (status, message) = map_try_on_error(&api_error(429));
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(message.contains("Quota exceeded"));
    }

    #[test]
    fn unknown_model_maps_to_404() {
        let (status, message) = map_try_on_error(&api_error(404));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(message.contains("model was not found"));
    }

    #[test]
    fn other_failures_map_to_500() {
        let (status, message) = map_try_on_error(&api_error(500));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.starts_with("Failed to process try-on request"));

        let (status, _) = map_try_on_error(&GeminiError::EmptyResponse);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
