use serde::{Deserialize, Serialize};

/// Both images arrive as `data:image/...;base64,` URLs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    pub person_image: String,
    pub garment_image: String,
}

/// `image_url` is a data URL when the model produced a composite image, and
/// null when it answered with text instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnResponse {
    pub image_url: Option<String>,
    pub message: String,
}
