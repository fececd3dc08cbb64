use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use mux_insights::{
    Agent, AgentMessage, AgentResponse, AnalyticsStep, DateRange, IdentifierType, InfoStep,
    InsightsError, InsightsRequest, InsightsWorkflow, Step, Workflow, WorkflowState,
};
use parking_lot::Mutex;
use serde_json::json;

/// Answers every prompt and records them in call order.
struct RecordingAgent {
    prompts: Arc<Mutex<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl RecordingAgent {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                prompts: Arc::clone(&prompts),
                fail_on: None,
            },
            prompts,
        )
    }

    fn failing_on(marker: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
        let (mut agent, prompts) = Self::new();
        agent.fail_on = Some(marker);
        (agent, prompts)
    }
}

#[async_trait]
impl Agent for RecordingAgent {
    fn name(&self) -> &str {
        "recording"
    }

    fn instructions(&self) -> &str {
        ""
    }

    async fn generate(&self, messages: Vec<AgentMessage>) -> mux_insights::Result<AgentResponse> {
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().push(prompt.clone());

        if let Some(marker) = self.fail_on {
            if prompt.contains(marker) {
                return Err(InsightsError::Generation("model unavailable".into()));
            }
        }
        if prompt.contains("key analytics") {
            Ok(AgentResponse::text("Views: 42"))
        } else {
            Ok(AgentResponse::text("Status: ready"))
        }
    }
}

fn workflow(agent: RecordingAgent) -> InsightsWorkflow {
    InsightsWorkflow::new(Arc::new(agent))
}

#[tokio::test]
async fn info_only_run_omits_analytics() -> AnyResult<()> {
    let (agent, prompts) = RecordingAgent::new();
    let workflow = workflow(agent);

    let output = workflow
        .run_json(json!({
            "identifierType": "asset",
            "identifier": "abc123",
            "includeAnalytics": false
        }))
        .await?;

    assert_eq!(output["infoText"], "Status: ready");
    assert!(output.get("analyticsText").is_none());
    assert_eq!(prompts.lock().len(), 1);
    assert!(prompts.lock()[0].contains("Identifier: abc123"));
    Ok(())
}

#[tokio::test]
async fn include_analytics_defaults_to_false() -> AnyResult<()> {
    let (agent, prompts) = RecordingAgent::new();
    let output = workflow(agent)
        .run_json(json!({ "identifierType": "playback", "identifier": "pb_9" }))
        .await?;

    assert!(output.get("analyticsText").is_none());
    assert_eq!(prompts.lock().len(), 1);
    Ok(())
}

#[tokio::test]
async fn analytics_run_merges_both_texts_with_date_range() -> AnyResult<()> {
    let (agent, prompts) = RecordingAgent::new();
    let output = workflow(agent)
        .run_json(json!({
            "identifierType": "playback",
            "identifier": "pb_1",
            "includeAnalytics": true,
            "dateRange": { "start": "2024-01-01", "end": "2024-01-31" }
        }))
        .await?;

    assert_eq!(output["infoText"], "Status: ready");
    assert_eq!(output["analyticsText"], "Views: 42");

    let prompts = prompts.lock();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Identifier type: playback"));
    assert!(prompts[1].contains("Date range: 2024-01-01 to 2024-01-31"));
    Ok(())
}

#[tokio::test]
async fn analytics_without_range_uses_default_period() -> AnyResult<()> {
    let (agent, prompts) = RecordingAgent::new();
    workflow(agent)
        .run(InsightsRequest::new(IdentifierType::Asset, "abc123").with_analytics(None))
        .await?;

    assert!(prompts.lock()[1].contains("Date range: default or recent period"));
    Ok(())
}

#[tokio::test]
async fn info_step_runs_before_analytics_step() -> AnyResult<()> {
    let (agent, prompts) = RecordingAgent::new();
    let execution = workflow(agent)
        .run(
            InsightsRequest::new(IdentifierType::Playback, "pb_1")
                .with_analytics(Some(DateRange::new("2024-01-01", "2024-01-31"))),
        )
        .await?;

    let prompts = prompts.lock();
    assert!(prompts[0].contains("fetch core details"));
    assert!(prompts[1].contains("key analytics"));
    assert_eq!(
        execution.states,
        vec![
            WorkflowState::NotStarted,
            WorkflowState::InfoFetched,
            WorkflowState::AnalyticsFetched,
            WorkflowState::Completed,
        ]
    );
    assert!(execution.run_id.starts_with("run-"));
    Ok(())
}

#[tokio::test]
async fn info_only_run_skips_analytics_state() -> AnyResult<()> {
    let (agent, _) = RecordingAgent::new();
    let execution = workflow(agent)
        .run(InsightsRequest::new(IdentifierType::Asset, "abc123"))
        .await?;

    assert_eq!(
        execution.states,
        vec![
            WorkflowState::NotStarted,
            WorkflowState::InfoFetched,
            WorkflowState::Completed,
        ]
    );
    assert_eq!(execution.result.analytics_text, None);
    Ok(())
}

#[tokio::test]
async fn missing_identifier_is_rejected_before_any_agent_call() {
    let (agent, prompts) = RecordingAgent::new();
    let err = workflow(agent)
        .run_json(json!({ "identifierType": "asset", "includeAnalytics": true }))
        .await
        .unwrap_err();

    match err {
        InsightsError::Validation(schema_err) => {
            assert_eq!(schema_err.path(), ["identifier".to_string()]);
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert!(prompts.lock().is_empty());
}

#[tokio::test]
async fn invalid_identifier_type_and_empty_identifier_are_rejected() {
    let (agent, prompts) = RecordingAgent::new();
    let workflow = workflow(agent);

    let bad_type = workflow
        .run_json(json!({ "identifierType": "live", "identifier": "x" }))
        .await;
    assert!(matches!(bad_type, Err(InsightsError::Validation(_))));

    let empty = workflow
        .run_json(json!({ "identifierType": "asset", "identifier": "" }))
        .await;
    assert!(matches!(empty, Err(InsightsError::Validation(_))));

    assert!(prompts.lock().is_empty());
}

#[tokio::test]
async fn typed_request_with_empty_identifier_never_reaches_the_agent() {
    let (agent, prompts) = RecordingAgent::new();
    let err = workflow(agent)
        .run(InsightsRequest::new(IdentifierType::Asset, "").with_analytics(None))
        .await
        .unwrap_err();

    match err {
        InsightsError::Validation(schema_err) => {
            assert_eq!(schema_err.path(), ["identifier".to_string()]);
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert!(prompts.lock().is_empty());
}

#[tokio::test]
async fn steps_validate_raw_input_before_prompting() {
    let (agent, prompts) = RecordingAgent::new();

    let info = InfoStep
        .execute_value(&agent, json!({ "identifierType": "asset", "identifier": "" }))
        .await;
    assert!(matches!(info, Err(InsightsError::Validation(_))));

    let analytics = AnalyticsStep
        .execute_value(
            &agent,
            json!({
                "identifierType": "asset",
                "identifier": "abc123",
                "dateRange": { "start": "2024-01-01" }
            }),
        )
        .await;
    assert!(matches!(analytics, Err(InsightsError::Validation(_))));
    assert!(prompts.lock().is_empty());

    let output = InfoStep
        .execute_value(&agent, json!({ "identifierType": "playback", "identifier": "pb_1" }))
        .await
        .unwrap();
    assert_eq!(output.info_text, "Status: ready");
    assert_eq!(prompts.lock().len(), 1);
}

#[tokio::test]
async fn analytics_failure_fails_the_whole_run() {
    let (agent, prompts) = RecordingAgent::failing_on("key analytics");
    let err = workflow(agent)
        .run_json(json!({
            "identifierType": "asset",
            "identifier": "abc123",
            "includeAnalytics": true
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, InsightsError::Generation(_)));
    assert_eq!(prompts.lock().len(), 2);
}

#[tokio::test]
async fn info_failure_skips_analytics() {
    let (agent, prompts) = RecordingAgent::failing_on("fetch core details");
    let result = workflow(agent)
        .run(InsightsRequest::new(IdentifierType::Asset, "abc123").with_analytics(None))
        .await;

    assert!(result.is_err());
    assert_eq!(prompts.lock().len(), 1);
}
