pub mod insights;
pub mod step;
pub mod steps;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::schema::Schema;

pub use insights::{
    input_schema as insights_input_schema, output_schema as insights_output_schema,
    InsightsWorkflow, INSIGHTS_WORKFLOW_ID,
};
pub use step::Step;
pub use steps::{AnalyticsStep, InfoStep, ANALYTICS_STEP_ID, INFO_STEP_ID};
pub use types::{
    AnalyticsOutput, AnalyticsRequest, DateRange, IdentifierType, InfoOutput, InfoRequest,
    InsightsPlan, InsightsRequest, InsightsResult, WorkflowExecution, WorkflowState,
};

/// A workflow a host runner can invoke by name with JSON input.
#[async_trait]
pub trait Workflow: Send + Sync {
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> Schema;

    fn output_schema(&self) -> Schema;

    async fn run_json(&self, input: Value) -> Result<Value>;
}

pub type WorkflowRegistry = BTreeMap<String, Arc<dyn Workflow>>;
