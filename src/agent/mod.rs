pub mod agent;
pub mod message;
pub mod mux;
pub mod registry;
pub mod tool_agent;

pub use agent::{Agent, AgentResponse, ToolCallRecord};
pub use message::{AgentMessage, MessageRole};
pub use mux::{mux_agent, MUX_AGENT_INSTRUCTIONS, MUX_AGENT_KEY, MUX_AGENT_NAME};
pub use registry::{register_agent, AgentRegistry};
pub use tool_agent::{ToolAgent, ToolAgentBuilder, DEFAULT_MAX_STEPS};
