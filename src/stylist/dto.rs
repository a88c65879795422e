use serde::{Deserialize, Serialize};

/// Body measurements in centimetres/kilograms. Bust, hips and shoulders are
/// optional; the prompt only mentions what was supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub bust: Option<f64>,
    pub waist: f64,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub shoulders: Option<f64>,
    pub gender: String,
}

impl BodyMeasurements {
    pub fn is_female(&self) -> bool {
        self.gender.eq_ignore_ascii_case("female")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreferences {
    pub style_preference: String,
    pub color_preferences: Vec<String>,
    pub clothing_items: Vec<String>,
    pub occasions: Vec<String>,
    pub comfort_priority: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub measurements: BodyMeasurements,
    pub preferences: StylePreferences,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// A `data:image/...;base64,` URL of the person photo.
    pub image: String,
    pub gender: String,
    #[serde(default)]
    pub occasion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GarmentLists {
    #[serde(default)]
    pub tops: Vec<String>,
    #[serde(default)]
    pub bottoms: Vec<String>,
    /// Only present for the female branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dresses: Option<Vec<String>>,
    #[serde(default)]
    pub accessories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRecommendation {
    pub name: String,
    pub hex: String,
}

/// Transient recommendation payload, produced per request and never
/// persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecommendation {
    #[serde(default)]
    pub body_type: String,
    #[serde(default)]
    pub recommendations: GarmentLists,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_recommendations: Option<Vec<ColorRecommendation>>,
    /// Set when the model reported a problem (for example, no person in the
    /// photo) or when the response could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StyleRecommendation {
    /// Empty recommendation carrying an error message, shaped per gender so
    /// the client still sees the fields it expects.
    pub fn error(message: impl Into<String>, female: bool) -> Self {
        Self {
            body_type: String::new(),
            recommendations: GarmentLists {
                tops: vec![],
                bottoms: vec![],
                dresses: female.then(Vec::new),
                accessories: vec![],
            },
            color_recommendations: Some(vec![]),
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The recommendation currently shown to the user, echoed back for
    /// context. Passed through opaquely.
    pub recommendation: serde_json::Value,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_recommendation: Option<serde_json::Value>,
}
