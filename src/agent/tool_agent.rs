use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::agent::{Agent, AgentResponse, ToolCallRecord};
use super::message::{AgentMessage, MessageRole};
use crate::error::{InsightsError, Result};
use crate::llm::{ContentBlock, DynLlmClient, LlmMessage, LlmRequest, LlmRole};
use crate::tools::{ToolOutput, ToolRegistry};

pub const DEFAULT_MAX_STEPS: usize = 5;

/// An agent backed by a hosted model and a fixed tool set.
pub struct ToolAgent {
    name: String,
    instructions: String,
    llm: DynLlmClient,
    tools: Arc<ToolRegistry>,
    max_steps: usize,
    temperature: f32,
}

impl ToolAgent {
    pub fn builder(name: impl Into<String>) -> ToolAgentBuilder {
        ToolAgentBuilder::new(name)
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn request(&self, messages: Vec<LlmMessage>, system: Option<String>) -> LlmRequest {
        let mut request = LlmRequest::new(messages);
        request.system = system;
        request.tools = self.tools.specs();
        request.temperature = self.temperature;
        request
    }

    /// Splits caller messages into the system prompt and the conversation.
    fn prepare(&self, messages: Vec<AgentMessage>) -> (String, Vec<LlmMessage>) {
        let mut system = self.instructions.trim().to_string();
        let mut conversation = Vec::with_capacity(messages.len());
        for message in messages {
            match message.role {
                MessageRole::System => {
                    system.push_str("\n\n");
                    system.push_str(&message.content);
                }
                MessageRole::User => conversation.push(LlmMessage::user_text(message.content)),
                MessageRole::Assistant => {
                    conversation.push(LlmMessage::assistant_text(message.content))
                }
            }
        }
        (system, conversation)
    }

    async fn run_tool(&self, name: &str, input: serde_json::Value) -> Result<ToolOutput> {
        match self.tools.call(name, input).await {
            Err(InsightsError::ToolNotRegistered(missing)) => {
                warn!(agent = %self.name, tool = %missing, "model requested unknown tool");
                Ok(ToolOutput::err(format!("tool `{missing}` is not available")))
            }
            other => other,
        }
    }
}

#[async_trait]
impl Agent for ToolAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn instructions(&self) -> &str {
        &self.instructions
    }

    #[instrument(skip(self, messages), fields(agent = %self.name))]
    async fn generate(&self, messages: Vec<AgentMessage>) -> Result<AgentResponse> {
        let (system, mut conversation) = self.prepare(messages);
        let mut tool_calls = Vec::new();
        let mut steps = 0;

        loop {
            steps += 1;
            let response = self
                .llm
                .complete(self.request(conversation.clone(), Some(system.clone())))
                .await?;
            let uses = response.tool_uses();

            if uses.is_empty() || steps >= self.max_steps {
                let text = response.text();
                if !uses.is_empty() {
                    warn!(steps, pending = uses.len(), "step limit reached with pending tool calls");
                    if text.is_empty() {
                        return Err(InsightsError::Generation(format!(
                            "agent `{}` hit its step limit of {} without a final answer",
                            self.name, self.max_steps
                        )));
                    }
                }
                return Ok(AgentResponse {
                    text,
                    tool_calls,
                    steps,
                });
            }

            conversation.push(LlmMessage {
                role: LlmRole::Assistant,
                content: response
                    .content
                    .into_iter()
                    .filter(|block| !matches!(block, ContentBlock::Unsupported))
                    .collect(),
            });

            let mut results = Vec::with_capacity(uses.len());
            for tool_use in uses {
                debug!(step = steps, tool = %tool_use.name, "executing tool call");
                let output = self.run_tool(&tool_use.name, tool_use.input.clone()).await?;
                tool_calls.push(ToolCallRecord {
                    name: tool_use.name,
                    input: tool_use.input,
                    is_error: output.is_error,
                });
                results.push(ContentBlock::ToolResult {
                    tool_use_id: tool_use.id,
                    content: output.content,
                    is_error: output.is_error,
                });
            }
            conversation.push(LlmMessage {
                role: LlmRole::User,
                content: results,
            });
        }
    }
}

pub struct ToolAgentBuilder {
    name: String,
    instructions: String,
    llm: Option<DynLlmClient>,
    tools: Arc<ToolRegistry>,
    max_steps: usize,
    temperature: f32,
}

impl ToolAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            llm: None,
            tools: Arc::new(ToolRegistry::new()),
            max_steps: DEFAULT_MAX_STEPS,
            temperature: 0.2,
        }
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn model(mut self, llm: DynLlmClient) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = tools;
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> Result<ToolAgent> {
        let llm = self.llm.ok_or_else(|| {
            InsightsError::Config(format!("agent `{}` has no model configured", self.name))
        })?;
        Ok(ToolAgent {
            name: self.name,
            instructions: self.instructions,
            llm,
            tools: self.tools,
            max_steps: self.max_steps,
            temperature: self.temperature,
        })
    }
}
