//! Model Context Protocol client for stdio tool providers, built on `rmcp`.

pub mod client;
pub mod connection;
pub mod convert;
pub mod tool;

pub use client::McpClient;
pub use connection::McpConnection;
pub use tool::McpTool;
