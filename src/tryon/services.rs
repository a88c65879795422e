use crate::gemini::{generate_with_fallback, Content, GeminiError, Part};
use crate::state::AppState;

use super::dto::TryOnResponse;

pub const TRY_ON_INSTRUCTION: &str = "Generate a realistic photo of the person wearing the \
    provided garment. The output should be the generated image only.";

/// Sends the instruction plus both photos and assembles the response: a data
/// URL when the model returned an image part, otherwise its text labelled as
/// such so the client can tell the difference.
pub async fn compose(
    state: &AppState,
    person: (&str, &str),
    garment: (&str, &str),
) -> Result<TryOnResponse, GeminiError> {
    let contents = Content::from_parts(vec![
        Part::text(TRY_ON_INSTRUCTION),
        Part::inline_image(person.0, person.1),
        Part::inline_image(garment.0, garment.1),
    ]);

    let response = generate_with_fallback(
        state.gemini.as_ref(),
        &state.config.gemini.models,
        &contents,
        None,
    )
    .await?;

    if let Some(img) = response.inline_image() {
        return Ok(TryOnResponse {
            image_url: Some(format!("data:{};base64,{}", img.mime_type, img.data)),
            message: "Virtual try-on generated successfully.".into(),
        });
    }

    let text = response.text().unwrap_or_default();
    Ok(TryOnResponse {
        image_url: None,
        message: format!("Model output (Text): {text}"),
    })
}
