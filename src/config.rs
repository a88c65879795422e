use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model names tried in order until one answers.
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let models: Vec<String> = std::env::var("GEMINI_MODELS")
            .unwrap_or_else(|_| "gemini-2.5-flash".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        anyhow::ensure!(
            !models.is_empty(),
            "GEMINI_MODELS must name at least one model"
        );
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY")?,
            models,
        };
        Ok(Self {
            database_url,
            gemini,
        })
    }
}
