use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use rmcp::service::{RunningService, ServiceError};
use rmcp::transport::{IntoTransport, TokioChildProcess};
use rmcp::{RoleClient, ServiceExt};
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, instrument, trace};

use super::convert::{call_params, output_from_result, spec_from_remote};
use crate::config::ServerConfig;
use crate::error::{InsightsError, Result};
use crate::tools::{ToolOutput, ToolSpec};

/// Parent variables a tool provider inherits; everything else comes from
/// the server's own env map.
const INHERITED_ENV: &[&str] = &["HOME", "LOGNAME", "PATH", "SHELL", "TERM", "USER"];

/// One initialized MCP session. Dropping it cancels the session and, for a
/// spawned server, kills the process.
pub struct McpConnection {
    server: String,
    service: RunningService<RoleClient, ()>,
    timeout: Duration,
}

impl McpConnection {
    /// Runs the `initialize` handshake over any rmcp client transport.
    pub async fn connect<T, E, A>(
        server: impl Into<String>,
        transport: T,
        timeout: Duration,
    ) -> Result<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let server = server.into();
        let service = match tokio::time::timeout(timeout, ().serve(transport)).await {
            Ok(Ok(service)) => service,
            Ok(Err(e)) => {
                return Err(InsightsError::ToolProvider(format!(
                    "handshake with `{server}` failed: {e}"
                )))
            }
            Err(_) => {
                return Err(InsightsError::ToolProvider(format!(
                    "server `{server}` did not answer `initialize` within {timeout:?}"
                )))
            }
        };
        debug!(server = %server, "tool provider initialized");
        Ok(Self {
            server,
            service,
            timeout,
        })
    }

    /// Spawns the server process and connects to its stdio.
    #[instrument(skip(config), fields(command = %config.command))]
    pub async fn spawn(server: &str, config: &ServerConfig) -> Result<Self> {
        let mut command = Command::new(&config.command);
        command
            .args(&config.args)
            .env_clear()
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        for key in INHERITED_ENV {
            if let Ok(value) = std::env::var(key) {
                command.env(key, value);
            }
        }
        command.envs(&config.env);

        debug!(args = ?config.args, "spawning tool provider");
        let transport = TokioChildProcess::new(command).map_err(|e| {
            InsightsError::ToolProvider(format!(
                "failed to launch `{}` for server `{server}`: {e}",
                config.command
            ))
        })?;
        Self::connect(server, transport, config.timeout).await
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Lists every tool the server offers, across all pages.
    pub async fn list_tools(&self) -> Result<Vec<ToolSpec>> {
        let tools = self
            .bounded("tools/list", self.service.list_all_tools())
            .await?;
        Ok(tools.into_iter().map(spec_from_remote).collect())
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutput> {
        let params = call_params(name, arguments)?;
        trace!(server = %self.server, tool = name, "sending tools/call");
        let result = self
            .bounded("tools/call", self.service.call_tool(params))
            .await?;
        Ok(output_from_result(result))
    }

    async fn bounded<T, F>(&self, method: &str, request: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(ServiceError::McpError(error))) => Err(InsightsError::ToolProvider(format!(
                "server `{}` returned error {}: {}",
                self.server, error.code.0, error.message
            ))),
            Ok(Err(e)) => Err(InsightsError::ToolProvider(format!(
                "`{method}` on `{}` failed: {e}",
                self.server
            ))),
            Err(_) => Err(InsightsError::ToolProvider(format!(
                "server `{}` did not answer `{method}` within {:?}",
                self.server, self.timeout
            ))),
        }
    }
}
