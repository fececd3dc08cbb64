use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::config::LlmConfig;
use crate::error::{InsightsError, Result};
use crate::llm::client::LlmClient;
use crate::llm::types::{ContentBlock, LlmRequest, LlmResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ERROR_BODY_LIMIT: usize = 500;

/// Messages API client.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| InsightsError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    fn body(&self, request: &LlmRequest) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens.min(self.config.max_tokens),
            "temperature": request.temperature,
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        if !request.tools.is_empty() {
            body["tools"] = json!(request.tools);
        }
        body
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip(self, request), fields(model = %self.config.model, messages = request.messages.len()))]
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let endpoint = self.endpoint();
        let response = self
            .client
            .post(&endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.body(&request))
            .send()
            .await
            .map_err(|e| InsightsError::Generation(format!("HTTP request error: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| InsightsError::Generation(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(InsightsError::Generation(format!(
                "request failed with status {status}: {}\nEndpoint: {endpoint}",
                truncate(&response_text)
            )));
        }

        let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
            InsightsError::Generation(format!(
                "response parse error: {e}\nResponse body: {}",
                truncate(&response_text)
            ))
        })?;

        let content: Vec<ContentBlock> = serde_json::from_value(payload["content"].clone())
            .map_err(|e| InsightsError::Generation(format!("missing content in response: {e}")))?;
        let stop_reason = payload["stop_reason"].as_str().map(str::to_string);
        debug!(
            id = payload["id"].as_str().unwrap_or_default(),
            input_tokens = payload["usage"]["input_tokens"].as_u64().unwrap_or_default(),
            output_tokens = payload["usage"]["output_tokens"].as_u64().unwrap_or_default(),
            stop_reason = ?stop_reason,
            blocks = content.len(),
            "model replied"
        );

        Ok(LlmResponse {
            content,
            stop_reason,
        })
    }
}

fn truncate(text: &str) -> String {
    if text.len() <= ERROR_BODY_LIMIT {
        return text.to_string();
    }
    let mut end = ERROR_BODY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated, {} bytes total)", &text[..end], text.len())
}
