use std::env;

use crate::error::{InsightsError, Result};

pub const MUX_TOKEN_ID: &str = "MUX_TOKEN_ID";
pub const MUX_TOKEN_SECRET: &str = "MUX_TOKEN_SECRET";
pub const MUX_BASE_URL: &str = "MUX_BASE_URL";

/// Environment variable access.
pub struct EnvConfig;

impl EnvConfig {
    /// Reads a required variable; unset and empty values are both errors.
    pub fn get_env(key: &str) -> Result<String> {
        Self::get_env_optional(key).ok_or_else(|| {
            InsightsError::Config(format!(
                "environment variable `{key}` is not set. Set it in `.env` or the process environment."
            ))
        })
    }

    /// Reads an optional variable. Empty values count as unset.
    pub fn get_env_optional(key: &str) -> Option<String> {
        non_empty(env::var(key).ok())
    }
}

/// Mux API credentials forwarded to the tool provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token_id: String,
    pub token_secret: String,
    pub base_url: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(EnvConfig::get_env_optional)
    }

    /// Builds credentials from an arbitrary key lookup.
    ///
    /// Fails with [`InsightsError::MissingCredential`] naming every required
    /// variable that is absent or empty. Whitespace is kept as given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_id = non_empty(lookup(MUX_TOKEN_ID));
        let token_secret = non_empty(lookup(MUX_TOKEN_SECRET));
        let base_url = non_empty(lookup(MUX_BASE_URL));

        match (token_id, token_secret) {
            (Some(token_id), Some(token_secret)) => Ok(Self {
                token_id,
                token_secret,
                base_url,
            }),
            (id, secret) => {
                let missing: Vec<&str> = [
                    id.is_none().then_some(MUX_TOKEN_ID),
                    secret.is_none().then_some(MUX_TOKEN_SECRET),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(InsightsError::MissingCredential(missing.join(", ")))
            }
        }
    }

    /// Environment entries for the tool provider process.
    ///
    /// `MUX_BASE_URL` is only present when an override is configured.
    pub fn to_env(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            (MUX_TOKEN_ID.to_string(), self.token_id.clone()),
            (MUX_TOKEN_SECRET.to_string(), self.token_secret.clone()),
        ];
        if let Some(base_url) = &self.base_url {
            vars.push((MUX_BASE_URL.to_string(), base_url.clone()));
        }
        vars
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token_id", &self.token_id)
            .field("token_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
