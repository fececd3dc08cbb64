pub mod client;
pub mod http;
pub mod types;

pub use client::{DynLlmClient, LlmClient};
#[cfg(feature = "anthropic-client")]
pub use http::AnthropicClient;
pub use types::{ContentBlock, LlmMessage, LlmRequest, LlmResponse, LlmRole, ToolUse};
