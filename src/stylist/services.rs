use tracing::{error, warn};

use crate::gemini::{
    extract_json, generate_with_fallback, split_image_data_url, Content, GenerationConfig, Part,
};
use crate::state::AppState;

use super::dto::{
    AnalyzeRequest, ChatRequest, ChatResponse, RecommendationRequest, StyleRecommendation,
};
use super::fallback::fallback_recommendation;
use super::prompts;

const PARSE_ERROR_MESSAGE: &str = "Failed to parse the API response. Please try again.";
const CALL_ERROR_MESSAGE: &str =
    "An error occurred while fetching recommendations. Please try again later.";
const CHAT_PARSE_MESSAGE: &str =
    "I understood your request, but I'm having trouble processing the update. \
     Could you try rephrasing?";
const CHAT_ERROR_MESSAGE: &str =
    "I'm sorry, I encountered an error while processing your message. Please try again.";

fn recommend_config() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(0.2),
        top_p: Some(0.8),
        top_k: Some(40),
        max_output_tokens: Some(1024),
    }
}

fn vision_config() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(0.4),
        top_p: Some(0.8),
        top_k: Some(32),
        max_output_tokens: Some(2048),
    }
}

fn chat_config() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(0.7),
        top_p: None,
        top_k: None,
        max_output_tokens: Some(2048),
    }
}

/// Measurement-based recommendations. Never fails the request: model or
/// parse trouble comes back as a recommendation with an `error` field.
pub async fn recommend(state: &AppState, req: &RecommendationRequest) -> StyleRecommendation {
    let female = req.measurements.is_female();
    let prompt = prompts::recommendation_prompt(&req.measurements, &req.preferences);
    let contents = Content::from_parts(vec![Part::text(prompt)]);

    let response = match generate_with_fallback(
        state.gemini.as_ref(),
        &state.config.gemini.models,
        &contents,
        Some(&recommend_config()),
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "recommendation call failed");
            return StyleRecommendation::error(CALL_ERROR_MESSAGE, female);
        }
    };

    let Some(text) = response.text() else {
        error!("recommendation response had no text");
        return StyleRecommendation::error(PARSE_ERROR_MESSAGE, female);
    };

    match extract_json::<StyleRecommendation>(text) {
        // An `error` field set by the model passes through untouched.
        Ok(rec) => rec,
        Err(e) => {
            error!(error = %e, "recommendation response not parseable");
            StyleRecommendation::error(PARSE_ERROR_MESSAGE, female)
        }
    }
}

/// Photo analysis. Degrades to the static gender-keyed fallback on invalid
/// input or any upstream failure.
pub async fn analyze_image(state: &AppState, req: &AnalyzeRequest) -> StyleRecommendation {
    let Some((mime, payload)) = split_image_data_url(&req.image) else {
        warn!("analyze request carried an invalid image data URL");
        return fallback_recommendation(&req.gender);
    };

    let prompt = prompts::vision_prompt(&req.gender, req.occasion.as_deref());
    let contents = Content::from_parts(vec![Part::text(prompt), Part::inline_image(mime, payload)]);

    let response = match generate_with_fallback(
        state.gemini.as_ref(),
        &state.config.gemini.models,
        &contents,
        Some(&vision_config()),
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "vision call failed, using fallback");
            return fallback_recommendation(&req.gender);
        }
    };

    let Some(text) = response.text() else {
        error!("vision response had no text, using fallback");
        return fallback_recommendation(&req.gender);
    };

    match extract_json::<StyleRecommendation>(text) {
        Ok(rec) => rec,
        Err(e) => {
            error!(error = %e, "vision response not parseable, using fallback");
            fallback_recommendation(&req.gender)
        }
    }
}

/// Style advisor chat over an existing recommendation.
pub async fn chat(state: &AppState, req: &ChatRequest) -> ChatResponse {
    let prompt = prompts::chat_prompt(&req.recommendation, &req.history, &req.message);
    let contents = Content::from_parts(vec![Part::text(prompt)]);

    let response = match generate_with_fallback(
        state.gemini.as_ref(),
        &state.config.gemini.models,
        &contents,
        Some(&chat_config()),
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "chat call failed");
            return ChatResponse {
                text: CHAT_ERROR_MESSAGE.into(),
                updated_recommendation: None,
            };
        }
    };

    let parsed = response
        .text()
        .ok_or(crate::gemini::GeminiError::EmptyResponse)
        .and_then(extract_json::<ChatResponse>);

    match parsed {
        Ok(chat) => chat,
        Err(e) => {
            warn!(error = %e, "chat response not parseable");
            ChatResponse {
                text: CHAT_PARSE_MESSAGE.into(),
                updated_recommendation: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::gemini::{Candidate, GenerateResponse, GeminiError, GenerativeModel};
    use crate::stylist::dto::{BodyMeasurements, StylePreferences};

    struct CannedModel {
        text: String,
    }

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(
            &self,
            _model: &str,
            _contents: &[Content],
            _config: Option<&GenerationConfig>,
        ) -> Result<GenerateResponse, GeminiError> {
            Ok(GenerateResponse {
                candidates: vec![Candidate {
                    content: Some(Content {
                        parts: vec![Part::text(self.text.clone())],
                    }),
                }],
            })
        }
    }

    fn state_with_model(model: Arc<dyn GenerativeModel>) -> AppState {
        let mut state = AppState::fake();
        state.gemini = model;
        state
    }

    fn recommendation_request(gender: &str) -> RecommendationRequest {
        RecommendationRequest {
            measurements: BodyMeasurements {
                height: 170.0,
                weight: 62.0,
                bust: None,
                waist: 70.0,
                hips: Some(95.0),
                shoulders: None,
                gender: gender.into(),
            },
            preferences: StylePreferences {
                style_preference: "classic".into(),
                color_preferences: vec!["navy".into()],
                clothing_items: vec!["blazers".into()],
                occasions: vec!["office".into()],
                comfort_priority: "medium".into(),
            },
        }
    }

    fn analyze_request(gender: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            image: "data:image/jpeg;base64,QUJDREVG".into(),
            gender: gender.into(),
            occasion: None,
        }
    }

    #[tokio::test]
    async fn recommend_parses_model_json() {
        let canned = json!({
            "bodyType": "Pear",
            "recommendations": {
                "tops": ["Boat neck"], "bottoms": ["Bootcut"],
                "dresses": ["Fit and flare"], "accessories": ["Scarf"]
            },
            "colorRecommendations": [{"name": "Teal", "hex": "#008080"}]
        });
        let state = state_with_model(Arc::new(CannedModel {
            text: format!("```json\n{canned}\n```"),
        }));

        let rec = recommend(&state, &recommendation_request("female")).await;
        assert_eq!(rec.body_type, "Pear");
        assert!(rec.error.is_none());
    }

    #[tokio::test]
    async fn recommend_passes_through_model_error_field() {
        let state = state_with_model(Arc::new(CannedModel {
            text: r#"{"error": "Multiple persons detected in the image"}"#.into(),
        }));
        let rec = recommend(&state, &recommendation_request("female")).await;
        assert_eq!(
            rec.error.as_deref(),
            Some("Multiple persons detected in the image")
        );
    }

    #[tokio::test]
    async fn recommend_maps_call_failure_to_error_payload() {
        // AppState::fake() wires in a model that always returns 503.
        let state = AppState::fake();
        let rec = recommend(&state, &recommendation_request("female")).await;
        assert_eq!(rec.error.as_deref(), Some(CALL_ERROR_MESSAGE));
        assert!(rec.recommendations.tops.is_empty());
        assert_eq!(rec.recommendations.dresses, Some(vec![]));

        let rec = recommend(&state, &recommendation_request("male")).await;
        assert!(rec.recommendations.dresses.is_none());
    }

    #[tokio::test]
    async fn recommend_maps_garbage_output_to_parse_error() {
        let state = state_with_model(Arc::new(CannedModel {
            text: "Sorry, I can only answer fashion questions in prose.".into(),
        }));
        let rec = recommend(&state, &recommendation_request("male")).await;
        assert_eq!(rec.error.as_deref(), Some(PARSE_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn analyze_falls_back_when_model_unreachable() {
        let state = AppState::fake();

        let rec = analyze_image(&state, &analyze_request("female")).await;
        assert_eq!(rec.body_type, "Balanced");
        assert_eq!(rec.recommendations.dresses.as_ref().unwrap().len(), 5);

        let rec = analyze_image(&state, &analyze_request("male")).await;
        assert_eq!(rec.body_type, "Athletic");
        assert!(rec.recommendations.dresses.is_none());
    }

    #[tokio::test]
    async fn analyze_falls_back_on_invalid_data_url() {
        // Model would answer fine; the input must be rejected first.
        let state = state_with_model(Arc::new(CannedModel {
            text: r#"{"bodyType": "X"}"#.into(),
        }));
        let mut req = analyze_request("male");
        req.image = "http://example.com/photo.jpg".into();

        let rec = analyze_image(&state, &req).await;
        assert_eq!(rec.body_type, "Athletic");
    }

    #[tokio::test]
    async fn analyze_returns_parsed_recommendation() {
        let state = state_with_model(Arc::new(CannedModel {
            text: r#"{"bodyType": "Rectangle", "recommendations": {"tops": ["Layered top"]}}"#
                .into(),
        }));
        let rec = analyze_image(&state, &analyze_request("female")).await;
        assert_eq!(rec.body_type, "Rectangle");
        assert_eq!(rec.recommendations.tops, vec!["Layered top".to_string()]);
    }

    #[tokio::test]
    async fn chat_parses_update_and_degrades_gracefully() {
        let chat_req = ChatRequest {
            recommendation: json!({"bodyType": "Athletic"}),
            history: vec![],
            message: "brighter colors please".into(),
        };

        let state = state_with_model(Arc::new(CannedModel {
            text: r#"{"text": "Here you go", "updatedRecommendation": {"bodyType": "Athletic"}}"#
                .into(),
        }));
        let resp = chat(&state, &chat_req).await;
        assert_eq!(resp.text, "Here you go");
        assert!(resp.updated_recommendation.is_some());

        let state = state_with_model(Arc::new(CannedModel {
            text: "plain prose, no json".into(),
        }));
        let resp = chat(&state, &chat_req).await;
        assert_eq!(resp.text, CHAT_PARSE_MESSAGE);
        assert!(resp.updated_recommendation.is_none());

        let resp = chat(&AppState::fake(), &chat_req).await;
        assert_eq!(resp.text, CHAT_ERROR_MESSAGE);
    }
}
