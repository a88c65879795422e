//! Gemini client — the single point of entry for all generative-model calls.
//!
//! No other module talks to the Generative Language API directly; the stylist
//! and try-on services go through [`GenerativeModel`] so tests can swap in a
//! stub via `AppState`.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no JSON object found in model output")]
    MissingJson,

    #[error("model returned no usable content")]
    EmptyResponse,
}

impl GeminiError {
    /// Upstream HTTP status, when the failure came from the API itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// --- wire types (camelCase per the v1beta generateContent schema) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String, // base64 payload
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_parts(parts: Vec<Part>) -> Vec<Content> {
        vec![Content { parts }]
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a GenerationConfig>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate part that carries text.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }

    /// First inline (image) part of the first candidate, if any.
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Seam for the hosted model so services can be tested with stubs.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        contents: &[Content],
        config: Option<&GenerationConfig>,
    ) -> Result<GenerateResponse, GeminiError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        contents: &[Content],
        config: Option<&GenerationConfig>,
    ) -> Result<GenerateResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = GenerateRequest {
            contents,
            generation_config: config,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // The API wraps errors as {"error": {"message": ...}}
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!(%status, model, "gemini call failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        debug!(model, candidates = parsed.candidates.len(), "gemini call ok");
        Ok(parsed)
    }
}

/// Calls each model name in order and returns the first success. The last
/// error is surfaced when every model fails. A fixed sequential list, no
/// backoff or circuit breaking.
pub async fn generate_with_fallback(
    model: &dyn GenerativeModel,
    models: &[String],
    contents: &[Content],
    config: Option<&GenerationConfig>,
) -> Result<GenerateResponse, GeminiError> {
    let mut last_error = GeminiError::EmptyResponse;
    for name in models {
        match model.generate(name, contents, config).await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                warn!(model = %name, error = %e, "model attempt failed, trying next");
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Pulls a JSON value of type `T` out of freeform model text: strict parse
/// first, then with markdown fences stripped, then the first `{...}` span.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, GeminiError> {
    let stripped = strip_json_fences(text);
    match serde_json::from_str(stripped) {
        Ok(v) => Ok(v),
        Err(first_err) => {
            lazy_static! {
                static ref JSON_OBJ_RE: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
            }
            match JSON_OBJ_RE.find(stripped) {
                Some(m) => serde_json::from_str(m.as_str()).map_err(GeminiError::Parse),
                None => Err(GeminiError::Parse(first_err)),
            }
        }
    }
}

/// Splits a `data:<mime>;base64,<payload>` URL into mime type and base64
/// payload. Only image mime types are accepted; the payload stays encoded
/// since the API takes base64 in `inlineData`.
pub fn split_image_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.split(';').next()?;
    if !mime.starts_with("image/") || payload.is_empty() {
        return None;
    }
    Some((mime, payload))
}

/// Strips ```json ... ``` or ``` ... ``` fences the model sometimes wraps
/// JSON output in.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}
