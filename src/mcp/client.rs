use std::sync::Arc;

use futures::future;
use tracing::{info, instrument};

use super::connection::McpConnection;
use super::tool::McpTool;
use crate::config::{McpConfig, ServerConfig};
use crate::error::Result;
use crate::tools::ToolRegistry;

/// Connects to the configured tool providers and exposes their tools.
pub struct McpClient {
    config: McpConfig,
}

impl McpClient {
    pub fn new(config: McpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &McpConfig {
        &self.config
    }

    /// Launches every configured server and collects its tools as
    /// `<server>_<tool>`. Any server failing to start aborts discovery.
    #[instrument(skip(self), fields(servers = self.config.servers.len()))]
    pub async fn get_tools(&self) -> Result<ToolRegistry> {
        let connects = self
            .config
            .servers
            .iter()
            .map(|(name, server)| Self::connect(name, server));

        let mut registry = ToolRegistry::new();
        for found in future::try_join_all(connects).await? {
            registry.extend(found);
        }
        info!(tools = registry.len(), "tool discovery finished");
        Ok(registry)
    }

    async fn connect(name: &str, server: &ServerConfig) -> Result<ToolRegistry> {
        let connection = Arc::new(McpConnection::spawn(name, server).await?);
        Self::discover(connection).await
    }

    /// Registers the tools of an initialized connection.
    pub async fn discover(connection: Arc<McpConnection>) -> Result<ToolRegistry> {
        let specs = connection.list_tools().await?;

        let mut registry = ToolRegistry::new();
        for spec in specs {
            let key = format!("{}_{}", connection.server(), spec.name);
            registry.register_as(key, Arc::new(McpTool::new(spec, Arc::clone(&connection))));
        }
        info!(server = connection.server(), tools = registry.len(), "registered remote tools");
        Ok(registry)
    }
}
