//! Prompt builders for the stylist endpoints. Every prompt instructs the
//! model to answer with a bare JSON object; parsing still tolerates fences
//! and surrounding prose.

use std::fmt::Write;

use super::dto::{BodyMeasurements, ChatMessage, StylePreferences};

pub fn recommendation_prompt(m: &BodyMeasurements, p: &StylePreferences) -> String {
    let mut prompt = String::from(
        "Provide fashion recommendations for a person with the following details:\n\n\
         **Body Measurements:**\n",
    );
    let _ = writeln!(prompt, "- Height: {} cm", m.height);
    let _ = writeln!(prompt, "- Weight: {} kg", m.weight);
    if let Some(bust) = m.bust {
        let _ = writeln!(prompt, "- Bust: {bust} cm");
    }
    let _ = writeln!(prompt, "- Waist: {} cm", m.waist);
    if let Some(hips) = m.hips {
        let _ = writeln!(prompt, "- Hips: {hips} cm");
    }
    if let Some(shoulders) = m.shoulders {
        let _ = writeln!(prompt, "- Shoulders: {shoulders} cm");
    }
    let _ = writeln!(prompt, "- Gender: {}", m.gender);

    let _ = write!(
        prompt,
        "\n**Style Preferences:**\n\
         - Preferred Style: {}\n\
         - Preferred Colors: {}\n\
         - Preferred Clothing Items: {}\n\
         - Occasion: {}\n\
         - Comfort Priority: {}\n",
        p.style_preference,
        p.color_preferences.join(", "),
        p.clothing_items.join(", "),
        p.occasions.join(", "),
        p.comfort_priority,
    );

    prompt.push_str(
        "\n**Instructions:**\n\
         - Determine the person's body type.\n\
         - Provide 5 tops, 5 bottoms, and 5 accessories that suit their body type and preferences.\n",
    );
    if m.is_female() {
        prompt.push_str("- Also provide 5 dresses.\n");
    }
    prompt.push_str(
        "- Suggest 5 color palettes that match their preferences.\n\
         - If the input is invalid (for example, if no person or multiple persons are detected \
         in an image input), return a JSON object with an \"error\" field describing the issue.\n\n\
         IMPORTANT: Your output MUST be a valid JSON object ONLY with no additional text, \
         headers, or commentary.\n\n\
         **Response Format:**\n\
         {\n\
           \"bodyType\": \"body shape\",\n\
           \"recommendations\": {\n\
             \"tops\": [\"Top 1\", \"Top 2\", \"Top 3\", \"Top 4\", \"Top 5\"],\n\
             \"bottoms\": [\"Bottom 1\", \"Bottom 2\", \"Bottom 3\", \"Bottom 4\", \"Bottom 5\"],\n",
    );
    if m.is_female() {
        prompt.push_str(
            "    \"dresses\": [\"Dress 1\", \"Dress 2\", \"Dress 3\", \"Dress 4\", \"Dress 5\"],\n",
        );
    }
    prompt.push_str(
        "    \"accessories\": [\"Accessory 1\", \"Accessory 2\", \"Accessory 3\", \
         \"Accessory 4\", \"Accessory 5\"]\n\
           },\n\
           \"colorRecommendations\": [\n\
             { \"name\": \"Color Name 1\", \"hex\": \"#RRGGBB\" },\n\
             { \"name\": \"Color Name 2\", \"hex\": \"#RRGGBB\" },\n\
             { \"name\": \"Color Name 3\", \"hex\": \"#RRGGBB\" },\n\
             { \"name\": \"Color Name 4\", \"hex\": \"#RRGGBB\" },\n\
             { \"name\": \"Color Name 5\", \"hex\": \"#RRGGBB\" }\n\
           ]\n\
         }",
    );
    prompt
}

const VISION_PROMPT: &str = "\
You are a fashion analysis AI. Analyze this image showing a person and provide fashion \
recommendations based on their body type.\n\
The person identifies as {gender}.\n\n\
Task:\n\
1. Determine the person's body type or shape based on the image\n\
2. Provide specific clothing recommendations that would flatter this body type\n\
3. Suggest color recommendations that would complement the person\n\n\
IMPORTANT: Format your response as a valid JSON object ONLY with no explanations, \
markdown, or additional text.\n\n\
Response format:\n\
{\n\
  \"bodyType\": \"[determined body type]\",\n\
  \"recommendations\": {\n\
    \"tops\": [\"[top 1]\", \"[top 2]\", \"[top 3]\", \"[top 4]\", \"[top 5]\"],\n\
    \"bottoms\": [\"[bottom 1]\", \"[bottom 2]\", \"[bottom 3]\", \"[bottom 4]\", \"[bottom 5]\"],\n\
    \"accessories\": [\"[accessory 1]\", \"[accessory 2]\", \"[accessory 3]\", \"[accessory 4]\", \"[accessory 5]\"]\n\
  },\n\
  \"colorRecommendations\": [\n\
    { \"name\": \"[color name 1]\", \"hex\": \"#[hex code 1]\" },\n\
    { \"name\": \"[color name 2]\", \"hex\": \"#[hex code 2]\" },\n\
    { \"name\": \"[color name 3]\", \"hex\": \"#[hex code 3]\" },\n\
    { \"name\": \"[color name 4]\", \"hex\": \"#[hex code 4]\" },\n\
    { \"name\": \"[color name 5]\", \"hex\": \"#[hex code 5]\" }\n\
  ]\n\
}";

pub fn vision_prompt(gender: &str, occasion: Option<&str>) -> String {
    let mut prompt = VISION_PROMPT.replace("{gender}", gender);
    if let Some(occasion) = occasion {
        let _ = write!(
            prompt,
            "\nThe user is dressing for the following occasion: \"{occasion}\". \
             Please tailor recommendations specifically for this event/context."
        );
    }
    prompt
}

pub fn chat_prompt(
    recommendation: &serde_json::Value,
    history: &[ChatMessage],
    user_message: &str,
) -> String {
    let transcript = history
        .iter()
        .map(|m| format!("{}: {}", m.role.to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert Style Advisor AI. You have provided a style recommendation to a user, \
         and now you are discussing it with them.\n\n\
         **Current Recommendation Context:**\n{context}\n\n\
         **Conversation History:**\n{transcript}\nUSER: {user_message}\n\n\
         **Instructions:**\n\
         1. Answer the user's question or respond to their feedback politely and professionally.\n\
         2. If the user is asking to CHANGE or UPDATE the recommendation (e.g., \"give me brighter \
         colors\", \"I don't like dresses\"), you MUST provide an updated JSON recommendation.\n\
         3. If the user is just asking a question (e.g., \"why this color?\"), you DO NOT need to \
         provide a JSON update.\n\n\
         **Response Format:**\n\
         You must return a JSON object with the following structure:\n\
         {{\n\
           \"text\": \"Your conversational response here...\",\n\
           \"updatedRecommendation\": {{ ... }} // OPTIONAL: Include only if the recommendation \
         needs to change based on user input\n\
         }}\n\n\
         IMPORTANT: Your output MUST be a valid JSON object ONLY.",
        context = serde_json::to_string_pretty(recommendation).unwrap_or_else(|_| "{}".into()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn measurements(gender: &str) -> BodyMeasurements {
        BodyMeasurements {
            height: 172.0,
            weight: 64.0,
            bust: Some(90.0),
            waist: 71.0,
            hips: None,
            shoulders: None,
            gender: gender.into(),
        }
    }

    fn preferences() -> StylePreferences {
        StylePreferences {
            style_preference: "casual".into(),
            color_preferences: vec!["navy".into(), "white".into()],
            clothing_items: vec!["jeans".into()],
            occasions: vec!["work".into(), "weekend".into()],
            comfort_priority: "high".into(),
        }
    }

    #[test]
    fn recommendation_prompt_includes_supplied_measurements() {
        let prompt = recommendation_prompt(&measurements("male"), &preferences());
        assert!(prompt.contains("- Height: 172 cm"));
        assert!(prompt.contains("- Bust: 90 cm"));
        assert!(!prompt.contains("Hips"));
        assert!(prompt.contains("- Preferred Colors: navy, white"));
        assert!(prompt.contains("- Occasion: work, weekend"));
        assert!(prompt.contains("valid JSON object ONLY"));
    }

    #[test]
    fn recommendation_prompt_requests_dresses_for_female_only() {
        let female = recommendation_prompt(&measurements("Female"), &preferences());
        assert!(female.contains("Also provide 5 dresses."));
        assert!(female.contains("\"dresses\""));

        let male = recommendation_prompt(&measurements("male"), &preferences());
        assert!(!male.contains("dresses"));
    }

    #[test]
    fn vision_prompt_substitutes_gender_and_occasion() {
        let prompt = vision_prompt("female", Some("a summer wedding"));
        assert!(prompt.contains("The person identifies as female."));
        assert!(prompt.contains("a summer wedding"));
        assert!(!prompt.contains("{gender}"));

        let without = vision_prompt("male", None);
        assert!(!without.contains("occasion"));
    }

    #[test]
    fn chat_prompt_embeds_context_and_transcript() {
        let history = vec![
            ChatMessage {
                role: "user".into(),
                content: "why navy?".into(),
            },
            ChatMessage {
                role: "assistant".into(),
                content: "It flatters your palette.".into(),
            },
        ];
        let prompt = chat_prompt(&json!({"bodyType": "Athletic"}), &history, "make it brighter");
        assert!(prompt.contains("\"bodyType\": \"Athletic\""));
        assert!(prompt.contains("USER: why navy?"));
        assert!(prompt.contains("ASSISTANT: It flatters your palette."));
        assert!(prompt.contains("USER: make it brighter"));
        assert!(prompt.contains("updatedRecommendation"));
    }
}
