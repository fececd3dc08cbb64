use std::collections::BTreeMap;
use std::time::Duration;

use super::env::Credentials;

pub const MUX_SERVER: &str = "mux";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Launch description for one stdio tool-provider process.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl ServerConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `@mux/mcp` server in dynamic-tools mode.
    pub fn mux(credentials: &Credentials) -> Self {
        credentials.to_env().into_iter().fold(
            Self::new("npx").args(["-y", "@mux/mcp@latest", "--client=claude", "--tools=dynamic"]),
            |server, (key, value)| server.env(key, value),
        )
    }
}

/// Named tool-provider servers.
#[derive(Clone, Debug, Default)]
pub struct McpConfig {
    pub servers: BTreeMap<String, ServerConfig>,
}

impl McpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, name: impl Into<String>, server: ServerConfig) -> Self {
        self.servers.insert(name.into(), server);
        self
    }

    pub fn mux(credentials: &Credentials) -> Self {
        Self::new().with_server(MUX_SERVER, ServerConfig::mux(credentials))
    }
}
