use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::connection::McpConnection;
use crate::error::Result;
use crate::tools::{Tool, ToolInvocation, ToolOutput, ToolSpec};

/// A tool living in a provider process, invoked through `tools/call`.
pub struct McpTool {
    spec: ToolSpec,
    connection: Arc<McpConnection>,
}

impl McpTool {
    pub fn new(spec: ToolSpec, connection: Arc<McpConnection>) -> Self {
        Self { spec, connection }
    }
}

#[async_trait]
impl Tool for McpTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, invocation: ToolInvocation) -> Result<ToolOutput> {
        debug!(server = self.connection.server(), tool = %invocation.name, "calling remote tool");
        self.connection
            .call_tool(&invocation.name, invocation.input)
            .await
    }
}
