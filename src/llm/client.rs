use std::sync::Arc;

use async_trait::async_trait;

use super::types::{LlmRequest, LlmResponse};
use crate::error::Result;

/// A hosted text-generation model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    fn model(&self) -> &str;

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse>;
}

pub type DynLlmClient = Arc<dyn LlmClient>;
