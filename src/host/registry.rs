use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::agent::{register_agent, Agent, AgentMessage, AgentRegistry, AgentResponse};
use crate::error::{InsightsError, Result};
use crate::schema::SchemaRegistry;
use crate::utils::LoggingConfig;
use crate::workflow::{Workflow, WorkflowRegistry};

/// Named agents and workflows exposed to a runner. Immutable once built.
pub struct Host {
    agents: AgentRegistry,
    workflows: WorkflowRegistry,
    logger: LoggingConfig,
}

impl Host {
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    pub fn logger(&self) -> &LoggingConfig {
        &self.logger
    }

    pub fn agent(&self, name: &str) -> Result<Arc<dyn Agent>> {
        self.agents
            .get(name)
            .cloned()
            .ok_or_else(|| InsightsError::AgentNotRegistered(name.to_string()))
    }

    pub fn workflow(&self, name: &str) -> Result<Arc<dyn Workflow>> {
        self.workflows
            .get(name)
            .cloned()
            .ok_or_else(|| InsightsError::WorkflowNotRegistered(name.to_string()))
    }

    pub fn agents(&self) -> impl Iterator<Item = (&str, &Arc<dyn Agent>)> {
        self.agents.iter().map(|(key, agent)| (key.as_str(), agent))
    }

    pub fn workflows(&self) -> impl Iterator<Item = (&str, &Arc<dyn Workflow>)> {
        self.workflows
            .iter()
            .map(|(key, workflow)| (key.as_str(), workflow))
    }

    pub async fn run_workflow(&self, name: &str, input: Value) -> Result<Value> {
        let workflow = self.workflow(name)?;
        info!(workflow = name, "invoking workflow");
        workflow.run_json(input).await
    }

    pub async fn generate(&self, agent: &str, messages: Vec<AgentMessage>) -> Result<AgentResponse> {
        self.agent(agent)?.generate(messages).await
    }

    /// Input and output schemas of every workflow, as `<id>.input` / `<id>.output`.
    pub fn schemas(&self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        for (id, workflow) in &self.workflows {
            registry.register(format!("{id}.input"), workflow.input_schema());
            registry.register(format!("{id}.output"), workflow.output_schema());
        }
        registry
    }
}

#[derive(Default)]
pub struct HostBuilder {
    agents: AgentRegistry,
    workflows: WorkflowRegistry,
    logger: Option<LoggingConfig>,
}

impl HostBuilder {
    pub fn agent(mut self, key: &str, agent: Arc<dyn Agent>) -> Self {
        register_agent(key, agent, &mut self.agents);
        self
    }

    pub fn workflow(mut self, workflow: Arc<dyn Workflow>) -> Self {
        self.workflows.insert(workflow.id().to_string(), workflow);
        self
    }

    pub fn logger(mut self, logger: LoggingConfig) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> Host {
        Host {
            agents: self.agents,
            workflows: self.workflows,
            logger: self.logger.unwrap_or_default(),
        }
    }
}
