pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod llm;
pub mod mcp;
pub mod schema;
pub mod tools;
pub mod utils;
pub mod workflow;

pub use agent::{
    mux_agent, register_agent, Agent, AgentMessage, AgentRegistry, AgentResponse, MessageRole,
    ToolAgent, ToolAgentBuilder, ToolCallRecord, MUX_AGENT_KEY, MUX_AGENT_NAME,
};
pub use cli::{schema_exports, RunArgs, SchemaExportEntry};
pub use config::{Credentials, EnvConfig, LlmConfig, McpConfig, ServerConfig};
pub use error::{InsightsError, Result};
pub use host::{discover_tools, AppContext, Host, HostBuilder};
#[cfg(feature = "anthropic-client")]
pub use llm::AnthropicClient;
pub use llm::{
    ContentBlock, DynLlmClient, LlmClient, LlmMessage, LlmRequest, LlmResponse, LlmRole, ToolUse,
};
pub use mcp::{McpClient, McpConnection, McpTool};
pub use schema::{Schema, SchemaError, SchemaKind, SchemaRegistry};
pub use tools::{Tool, ToolInvocation, ToolOutput, ToolRegistry, ToolSpec};
pub use utils::{logging, validation, LoggingConfig};
pub use workflow::{
    AnalyticsRequest, AnalyticsStep, DateRange, IdentifierType, InfoRequest, InfoStep,
    InsightsPlan, InsightsRequest, InsightsResult, InsightsWorkflow, Step, Workflow,
    WorkflowExecution, WorkflowRegistry, WorkflowState, INSIGHTS_WORKFLOW_ID,
};
