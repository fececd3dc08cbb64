use std::sync::Arc;

use super::tool_agent::ToolAgent;
use crate::error::Result;
use crate::llm::DynLlmClient;
use crate::tools::ToolRegistry;

pub const MUX_AGENT_KEY: &str = "muxAgent";
pub const MUX_AGENT_NAME: &str = "Mux AI Assist";

pub const MUX_AGENT_INSTRUCTIONS: &str = "
You are a helpful assistant for Mux. You can:
- Fetch video details (status, duration, playback IDs, etc.)
- Fetch analytics and performance metrics for videos

When users ask for video info or analytics:
- Confirm what identifier they have (e.g., asset ID, playback ID)
- Use the MCP Mux tools to retrieve the data
- Summarize results clearly. Include key fields like title/name, duration, created date, playback ID(s), and relevant analytics KPIs.
- If a query needs more context (time range, filters), ask for it before running analytics.
";

/// The Mux assistant bound to the discovered Mux tools.
pub fn mux_agent(llm: DynLlmClient, tools: Arc<ToolRegistry>) -> Result<ToolAgent> {
    ToolAgent::builder(MUX_AGENT_NAME)
        .instructions(MUX_AGENT_INSTRUCTIONS)
        .model(llm)
        .tools(tools)
        .build()
}
