use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEBUG_ENV: &str = "MUX_INSIGHTS_DEBUG";

/// Logger settings held by the host.
///
/// Supported environment variables:
/// - `RUST_LOG`: overrides the filter entirely
/// - `MUX_INSIGHTS_DEBUG`: debug level plus file, line and thread ids
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        let level = if Self::is_debug() { "debug" } else { self.level.as_str() };
        format!("mux_insights={level},warn")
    }

    /// Installs the global subscriber. Later calls are no-ops.
    pub fn init(&self) {
        let is_debug = Self::is_debug();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(is_debug)
            .with_file(is_debug)
            .with_line_number(is_debug)
            .with_thread_ids(is_debug);

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(logger = %self.name, "debug logging enabled");
        }
    }

    pub fn is_debug() -> bool {
        env::var(DEBUG_ENV).is_ok()
    }
}
