use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;

/// What the model sees of a tool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "ToolSpec::empty_input_schema")]
    pub input_schema: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Self::empty_input_schema(),
        }
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    fn empty_input_schema() -> Value {
        json!({ "type": "object", "properties": {} })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub input: Value,
}

impl ToolInvocation {
    pub fn new<T: Into<String>>(name: T, input: Value) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Result handed back to the model. `is_error` marks a tool-level failure
/// the model should see, as opposed to a transport failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn err(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> &ToolSpec;

    fn name(&self) -> &str {
        &self.spec().name
    }

    async fn call(&self, invocation: ToolInvocation) -> Result<ToolOutput>;
}
