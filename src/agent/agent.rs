use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::message::AgentMessage;
use crate::error::Result;

/// A tool invocation made while generating a response.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ToolCallRecord {
    pub name: String,
    pub input: Value,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub steps: usize,
}

impl AgentResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
            steps: 1,
        }
    }
}

#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    fn instructions(&self) -> &str;

    /// Produces a reply to the conversation, calling tools as the model asks.
    async fn generate(&self, messages: Vec<AgentMessage>) -> Result<AgentResponse>;
}
