use url::Url;

use super::error::GeneratorError;

pub const API_KEY_ENV: &str = "EMERGENT_LLM_KEY";
pub const BASE_URL_ENV: &str = "EMERGENT_LLM_BASE_URL";
pub const MODEL_ENV: &str = "EMERGENT_LLM_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://integrations.emergentagent.com/api/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub session_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GeneratorSettings {
    /// Builds settings from a key lookup. There is no built-in credential: a
    /// missing key is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GeneratorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or(GeneratorError::MissingApiKey(API_KEY_ENV))?;

        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|err| GeneratorError::Config(format!("invalid {BASE_URL_ENV} {base_url}: {err}")))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: lookup(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            session_id: format!("property-desc-{}", std::process::id()),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
