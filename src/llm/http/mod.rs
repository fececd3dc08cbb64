//! HTTP clients for hosted models.

#[cfg(feature = "anthropic-client")]
pub mod anthropic;

#[cfg(feature = "anthropic-client")]
pub use anthropic::AnthropicClient;
