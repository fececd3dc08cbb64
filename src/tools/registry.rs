use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{InsightsError, Result};
use crate::tools::tool::{Tool, ToolInvocation, ToolOutput, ToolSpec};

/// Tools available to an agent, keyed by name. Built once during discovery.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registers under an explicit key, which may differ from the tool's own name.
    pub fn register_as(&mut self, name: impl Into<String>, tool: Arc<dyn Tool>) {
        self.tools.insert(name.into(), tool);
    }

    pub fn extend(&mut self, other: ToolRegistry) {
        self.tools.extend(other.tools);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(Arc::clone)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Specs keyed by registry name, as advertised to the model.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|(name, tool)| {
                let mut spec = tool.spec().clone();
                spec.name = name.clone();
                spec
            })
            .collect()
    }

    pub async fn call(&self, name: &str, input: serde_json::Value) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| InsightsError::ToolNotRegistered(name.to_string()))?;
        tool.call(ToolInvocation::new(tool.name(), input)).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.tools.keys()).finish()
    }
}
