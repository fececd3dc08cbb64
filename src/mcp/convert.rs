//! Conversions between rmcp model types and the crate's tool types.

use rmcp::model::{CallToolRequestParams, CallToolResult, Tool as RemoteTool};
use serde_json::{json, Value};

use crate::error::{InsightsError, Result};
use crate::tools::{ToolOutput, ToolSpec};

/// Describes a remote tool under its own (un-namespaced) name.
pub fn spec_from_remote(tool: RemoteTool) -> ToolSpec {
    let description = tool
        .description
        .as_deref()
        .map(str::to_string)
        .unwrap_or_default();
    ToolSpec::new(tool.name.to_string(), description)
        .with_input_schema(Value::Object(tool.input_schema.as_ref().clone()))
}

/// Builds `tools/call` params. The model's input must be an object or null.
pub fn call_params(name: &str, arguments: Value) -> Result<CallToolRequestParams> {
    let arguments = match arguments {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            return Err(InsightsError::ToolProvider(format!(
                "arguments for `{name}` must be a JSON object, got {other}"
            )))
        }
    };
    Ok(serde_json::from_value(json!({
        "name": name,
        "arguments": arguments,
    }))?)
}

/// Joins text blocks with newlines; other block kinds are passed as JSON.
pub fn output_from_result(result: CallToolResult) -> ToolOutput {
    let content = result
        .content
        .iter()
        .filter_map(|block| serde_json::to_value(block).ok())
        .map(|block| match block["type"].as_str() {
            Some("text") => block["text"].as_str().unwrap_or_default().to_string(),
            _ => block.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    if result.is_error.unwrap_or(false) {
        ToolOutput::err(content)
    } else {
        ToolOutput::ok(content)
    }
}
