use std::sync::Arc;

use tracing::info;

use super::registry::Host;
use crate::agent::{mux_agent, Agent, MUX_AGENT_KEY};
use crate::config::{Credentials, McpConfig};
use crate::error::Result;
use crate::llm::DynLlmClient;
use crate::mcp::McpClient;
use crate::tools::ToolRegistry;
use crate::utils::LoggingConfig;
use crate::workflow::InsightsWorkflow;

/// Everything built at startup, shared read-only afterwards.
pub struct AppContext {
    pub credentials: Credentials,
    pub tools: Arc<ToolRegistry>,
    pub host: Arc<Host>,
}

impl AppContext {
    /// Full startup from the process environment: credentials, tool
    /// discovery, model client, agent, workflow, host.
    #[cfg(feature = "anthropic-client")]
    pub async fn bootstrap(logger: LoggingConfig) -> Result<Self> {
        use crate::config::LlmConfig;
        use crate::llm::AnthropicClient;

        let credentials = Credentials::from_env()?;
        let llm_config = LlmConfig::from_env()?;
        let tools = discover_tools(&credentials).await?;
        let llm: DynLlmClient = Arc::new(AnthropicClient::new(llm_config)?);
        Self::assemble(credentials, tools, llm, logger)
    }

    /// Wires already-built parts into the agent, workflow and host.
    pub fn assemble(
        credentials: Credentials,
        tools: ToolRegistry,
        llm: DynLlmClient,
        logger: LoggingConfig,
    ) -> Result<Self> {
        let tools = Arc::new(tools);
        let agent: Arc<dyn Agent> = Arc::new(mux_agent(llm, Arc::clone(&tools))?);
        let workflow = Arc::new(InsightsWorkflow::new(Arc::clone(&agent)));

        let host = Host::builder()
            .agent(MUX_AGENT_KEY, agent)
            .workflow(workflow)
            .logger(logger)
            .build();
        info!(tools = tools.len(), "host ready");

        Ok(Self {
            credentials,
            tools,
            host: Arc::new(host),
        })
    }
}

/// Launches the Mux tool provider and returns its tools.
pub async fn discover_tools(credentials: &Credentials) -> Result<ToolRegistry> {
    McpClient::new(McpConfig::mux(credentials)).get_tools().await
}
