use super::env::EnvConfig;
use crate::error::Result;
use crate::utils::validate_url;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Hosted model settings for the agent.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: 4096,
            temperature: 0.2,
        }
    }

    /// Reads `ANTHROPIC_API_KEY` plus the optional `ANTHROPIC_MODEL` and
    /// `ANTHROPIC_BASE_URL` overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(EnvConfig::get_env("ANTHROPIC_API_KEY")?);
        if let Some(model) = EnvConfig::get_env_optional("ANTHROPIC_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = EnvConfig::get_env_optional("ANTHROPIC_BASE_URL") {
            validate_url("ANTHROPIC_BASE_URL", &base_url)?;
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
