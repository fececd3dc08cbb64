pub mod env;
pub mod llm;
pub mod mcp;

pub use env::{Credentials, EnvConfig};
pub use llm::LlmConfig;
pub use mcp::{McpConfig, ServerConfig};
