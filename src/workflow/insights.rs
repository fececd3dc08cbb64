use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use super::step::Step;
use super::steps::{date_range_schema, identifier_schema, identifier_type_schema, AnalyticsStep, InfoStep};
use super::types::{InsightsPlan, InsightsRequest, InsightsResult, WorkflowExecution, WorkflowState};
use super::Workflow;
use crate::agent::Agent;
use crate::error::Result;
use crate::schema::{validate_value, Schema};

pub const INSIGHTS_WORKFLOW_ID: &str = "mux-video-insights";

/// Fetches video info and, when asked, analytics through one shared agent.
pub struct InsightsWorkflow {
    agent: Arc<dyn Agent>,
    info: InfoStep,
    analytics: AnalyticsStep,
}

impl InsightsWorkflow {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            info: InfoStep,
            analytics: AnalyticsStep,
        }
    }

    /// Validates raw JSON input, then runs.
    pub async fn run_value(&self, input: Value) -> Result<WorkflowExecution> {
        validate_value(&input_schema(), &input, &mut Vec::new())?;
        let request: InsightsRequest = serde_json::from_value(input)?;
        self.run(request).await
    }

    /// Runs both steps in order. Nothing reaches the agent if the request
    /// fails validation.
    #[instrument(skip(self, request), fields(workflow = INSIGHTS_WORKFLOW_ID, identifier = %request.identifier))]
    pub async fn run(&self, request: InsightsRequest) -> Result<WorkflowExecution> {
        validate_value(
            &input_schema(),
            &serde_json::to_value(&request)?,
            &mut Vec::new(),
        )?;
        let run_id = run_id();
        let plan = InsightsPlan::from_request(&request);
        let mut states = vec![WorkflowState::NotStarted];
        info!(%run_id, analytics = plan.includes_analytics(), "workflow started");

        let result = match self.execute_plan(plan, &mut states).await {
            Ok(result) => result,
            Err(err) => {
                error!(%run_id, state = ?states.last(), error = %err, "workflow aborted");
                return Err(err);
            }
        };

        states.push(WorkflowState::Completed);
        info!(%run_id, "workflow completed");
        Ok(WorkflowExecution {
            run_id,
            workflow: INSIGHTS_WORKFLOW_ID.to_string(),
            states,
            result,
        })
    }

    async fn execute_plan(
        &self,
        plan: InsightsPlan,
        states: &mut Vec<WorkflowState>,
    ) -> Result<InsightsResult> {
        let agent = self.agent.as_ref();
        match plan {
            InsightsPlan::InfoOnly(info) => {
                let info = self
                    .info
                    .execute_value(agent, serde_json::to_value(info)?)
                    .await?;
                states.push(WorkflowState::InfoFetched);
                Ok(InsightsResult {
                    info_text: info.info_text,
                    analytics_text: None,
                })
            }
            InsightsPlan::InfoAndAnalytics(info, analytics) => {
                let info = self
                    .info
                    .execute_value(agent, serde_json::to_value(info)?)
                    .await?;
                states.push(WorkflowState::InfoFetched);
                let analytics = self
                    .analytics
                    .execute_value(agent, serde_json::to_value(analytics)?)
                    .await?;
                states.push(WorkflowState::AnalyticsFetched);
                Ok(InsightsResult {
                    info_text: info.info_text,
                    analytics_text: Some(analytics.analytics_text),
                })
            }
        }
    }
}

#[async_trait]
impl Workflow for InsightsWorkflow {
    fn id(&self) -> &str {
        INSIGHTS_WORKFLOW_ID
    }

    fn description(&self) -> &str {
        "Fetch Mux video info and optionally analytics using MCP tools via the agent"
    }

    fn input_schema(&self) -> Schema {
        input_schema()
    }

    fn output_schema(&self) -> Schema {
        output_schema()
    }

    async fn run_json(&self, input: Value) -> Result<Value> {
        let execution = self.run_value(input).await?;
        Ok(serde_json::to_value(execution.result)?)
    }
}

pub fn input_schema() -> Schema {
    Schema::object(
        [
            ("identifierType", identifier_type_schema()),
            ("identifier", identifier_schema()),
            (
                "includeAnalytics",
                Schema::boolean().with_default(json!(false)),
            ),
            ("dateRange", date_range_schema()),
        ],
        &["identifierType", "identifier"],
    )
    .with_name(INSIGHTS_WORKFLOW_ID)
}

pub fn output_schema() -> Schema {
    Schema::object(
        [
            ("infoText", Schema::string()),
            ("analyticsText", Schema::string()),
        ],
        &["infoText"],
    )
}

fn run_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("run-{}-{}", now.as_secs(), now.subsec_nanos())
}
