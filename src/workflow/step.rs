use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::agent::{Agent, AgentMessage};
use crate::error::Result;
use crate::schema::{validate_value, Schema};

/// A unit of work that turns typed input into a prompt, asks the agent,
/// and wraps the reply in typed output.
#[async_trait]
pub trait Step: Send + Sync {
    type Input: Serialize + DeserializeOwned + Send + Sync;
    type Output: Serialize + Send;

    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Schema;

    fn output_schema(&self) -> Schema;

    fn render_prompt(&self, input: &Self::Input) -> String;

    fn into_output(&self, text: String) -> Self::Output;

    async fn execute(&self, agent: &dyn Agent, input: Self::Input) -> Result<Self::Output> {
        let prompt = self.render_prompt(&input);
        debug!(step = self.id(), prompt_len = prompt.len(), "running step");
        let response = agent.generate(vec![AgentMessage::user(prompt)]).await?;
        Ok(self.into_output(response.text))
    }

    /// Validates raw input against [`Step::input_schema`] before executing.
    async fn execute_value(&self, agent: &dyn Agent, input: Value) -> Result<Self::Output> {
        validate_value(&self.input_schema(), &input, &mut Vec::new())?;
        let input: Self::Input = serde_json::from_value(input)?;
        self.execute(agent, input).await
    }
}
