//! Language model configuration

use std::time::Duration;

use serde::Deserialize;

use crate::error::LlmError;

/// Settings for the Gemini adapter
///
/// Read from `LLM_*` environment variables. The bare `API_KEY` variable is
/// honored when `LLM_API_KEY` is absent. A blank key counts as no key.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// REST root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, LlmError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("LLM").try_parsing(true))
            .build()?;
        let fallback = std::env::var("API_KEY").ok();
        Self::from_settings(settings, fallback)
    }

    /// Builds from already-collected settings plus an optional fallback key
    pub fn from_settings(
        settings: config::Config,
        fallback_key: Option<String>,
    ) -> Result<Self, LlmError> {
        let mut config: LlmConfig = settings.try_deserialize()?;
        config.api_key = normalize_key(config.api_key).or_else(|| normalize_key(fallback_key));
        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = normalize_key(Some(key.into()));
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}
