use thiserror::Error;

use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, InsightsError>;

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("missing Mux credentials: {0}. Please set MUX_TOKEN_ID and MUX_TOKEN_SECRET in your environment.")]
    MissingCredential(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("tool provider error: {0}")]
    ToolProvider(String),
    #[error("tool `{0}` not registered")]
    ToolNotRegistered(String),
    #[error("agent `{0}` not registered")]
    AgentNotRegistered(String),
    #[error("workflow `{0}` not registered")]
    WorkflowNotRegistered(String),
    #[error(transparent)]
    Validation(#[from] SchemaError),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for InsightsError {
    fn from(error: serde_json::Error) -> Self {
        InsightsError::Serialization(error.to_string())
    }
}
