use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use mux_insights::{
    mux_agent, Agent, AgentMessage, ContentBlock, InsightsError, LlmClient, LlmRequest,
    LlmResponse, LlmRole, Tool, ToolAgent, ToolInvocation, ToolOutput, ToolRegistry, ToolSpec,
    MUX_AGENT_NAME,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Replays canned responses and keeps every request it was sent.
struct ScriptedLlm {
    responses: Mutex<VecDeque<LlmResponse>>,
    requests: Arc<Mutex<Vec<LlmRequest>>>,
}

impl ScriptedLlm {
    fn new(responses: Vec<LlmResponse>) -> (Arc<Self>, Arc<Mutex<Vec<LlmRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let llm = Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Arc::clone(&requests),
        });
        (llm, requests)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: LlmRequest) -> mux_insights::Result<LlmResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| InsightsError::Generation("script exhausted".into()))
    }
}

fn tool_use(id: &str, name: &str, input: Value) -> LlmResponse {
    LlmResponse {
        content: vec![
            ContentBlock::text("Let me look that up."),
            ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            },
        ],
        stop_reason: Some("tool_use".to_string()),
    }
}

struct AssetTool {
    spec: ToolSpec,
    calls: Arc<Mutex<Vec<ToolInvocation>>>,
}

#[async_trait]
impl Tool for AssetTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, invocation: ToolInvocation) -> mux_insights::Result<ToolOutput> {
        self.calls.lock().push(invocation);
        Ok(ToolOutput::ok("duration: 120s"))
    }
}

fn registry() -> (Arc<ToolRegistry>, Arc<Mutex<Vec<ToolInvocation>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut registry = ToolRegistry::new();
    registry.register_as(
        "mux_get_asset",
        Arc::new(AssetTool {
            spec: ToolSpec::new("get_asset", "Retrieve an asset"),
            calls: Arc::clone(&calls),
        }),
    );
    (Arc::new(registry), calls)
}

#[tokio::test]
async fn tool_use_round_trip_ends_with_final_text() -> AnyResult<()> {
    let (llm, requests) = ScriptedLlm::new(vec![
        tool_use("toolu_1", "mux_get_asset", json!({ "ASSET_ID": "abc123" })),
        LlmResponse::from_text("The video is 2 minutes long."),
    ]);
    let (tools, calls) = registry();
    let agent = mux_agent(llm, tools)?;

    let response = agent
        .generate(vec![AgentMessage::user("How long is abc123?")])
        .await?;

    assert_eq!(response.text, "The video is 2 minutes long.");
    assert_eq!(response.steps, 2);
    assert_eq!(response.tool_calls.len(), 1);
    assert!(!response.tool_calls[0].is_error);
    assert_eq!(calls.lock()[0].input["ASSET_ID"], "abc123");

    let requests = requests.lock();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools[0].name, "mux_get_asset");
    assert!(requests[0]
        .system
        .as_deref()
        .unwrap_or_default()
        .contains("helpful assistant for Mux"));

    let second = &requests[1].messages;
    assert_eq!(second.len(), 3);
    assert_eq!(second[1].role, LlmRole::Assistant);
    assert_eq!(second[2].role, LlmRole::User);
    assert_eq!(
        second[2].content[0],
        ContentBlock::ToolResult {
            tool_use_id: "toolu_1".into(),
            content: "duration: 120s".into(),
            is_error: false,
        }
    );
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_reported_back_to_the_model() -> AnyResult<()> {
    let (llm, requests) = ScriptedLlm::new(vec![
        tool_use("toolu_9", "mux_delete_asset", json!({})),
        LlmResponse::from_text("I cannot delete assets."),
    ]);
    let (tools, calls) = registry();
    let agent = mux_agent(llm, tools)?;

    let response = agent.generate(vec![AgentMessage::user("delete it")]).await?;

    assert_eq!(response.text, "I cannot delete assets.");
    assert!(response.tool_calls[0].is_error);
    assert!(calls.lock().is_empty());
    match &requests.lock()[1].messages[2].content[0] {
        ContentBlock::ToolResult {
            is_error, content, ..
        } => {
            assert!(*is_error);
            assert!(content.contains("mux_delete_asset"));
        }
        other => panic!("expected tool result, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn loop_stops_at_max_steps() -> AnyResult<()> {
    let (llm, requests) = ScriptedLlm::new(vec![
        tool_use("toolu_1", "mux_get_asset", json!({})),
        tool_use("toolu_2", "mux_get_asset", json!({})),
        tool_use("toolu_3", "mux_get_asset", json!({})),
    ]);
    let (tools, calls) = registry();
    let agent = ToolAgent::builder("bounded")
        .model(llm)
        .tools(tools)
        .max_steps(2)
        .build()?;

    let response = agent.generate(vec![AgentMessage::user("loop")]).await?;

    assert_eq!(response.steps, 2);
    assert_eq!(response.text, "Let me look that up.");
    assert_eq!(requests.lock().len(), 2);
    assert_eq!(calls.lock().len(), 1);
    Ok(())
}

#[tokio::test]
async fn step_limit_without_any_text_is_an_error() -> AnyResult<()> {
    let silent_call = |id: &str| LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: "mux_get_asset".to_string(),
            input: json!({}),
        }],
        stop_reason: Some("tool_use".to_string()),
    };
    let (llm, requests) = ScriptedLlm::new(vec![silent_call("toolu_1"), silent_call("toolu_2")]);
    let (tools, calls) = registry();
    let agent = ToolAgent::builder("bounded")
        .model(llm)
        .tools(tools)
        .max_steps(2)
        .build()?;

    let err = agent
        .generate(vec![AgentMessage::user("loop")])
        .await
        .unwrap_err();

    match err {
        InsightsError::Generation(message) => assert!(message.contains("step limit of 2")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(requests.lock().len(), 2);
    assert_eq!(calls.lock().len(), 1);
    Ok(())
}

#[tokio::test]
async fn earlier_turns_are_replayed_in_order() -> AnyResult<()> {
    let (llm, requests) = ScriptedLlm::new(vec![LlmResponse::from_text("Views: 42")]);
    let agent = ToolAgent::builder("plain").model(llm).build()?;

    agent
        .generate(vec![
            AgentMessage::user("Details for abc123?"),
            AgentMessage::assistant("Status: ready"),
            AgentMessage::user("And its views?"),
        ])
        .await?;

    let requests = requests.lock();
    let messages = &requests[0].messages;
    assert_eq!(
        messages.iter().map(|m| m.role.clone()).collect::<Vec<_>>(),
        [LlmRole::User, LlmRole::Assistant, LlmRole::User]
    );
    assert_eq!(messages[1].content, vec![ContentBlock::text("Status: ready")]);
    Ok(())
}

#[tokio::test]
async fn model_errors_propagate() {
    let (llm, _) = ScriptedLlm::new(Vec::new());
    let (tools, _) = registry();
    let agent = mux_agent(llm, tools).unwrap();

    let err = agent.generate(vec![AgentMessage::user("hi")]).await.unwrap_err();
    assert!(matches!(err, InsightsError::Generation(_)));
}

#[tokio::test]
async fn system_messages_extend_instructions() -> AnyResult<()> {
    let (llm, requests) = ScriptedLlm::new(vec![LlmResponse::from_text("ok")]);
    let agent = ToolAgent::builder("plain")
        .instructions("Base.")
        .model(llm)
        .build()?;

    agent
        .generate(vec![
            AgentMessage::system("Answer in French."),
            AgentMessage::user("hello"),
        ])
        .await?;

    let requests = requests.lock();
    assert_eq!(
        requests[0].system.as_deref(),
        Some("Base.\n\nAnswer in French.")
    );
    assert_eq!(requests[0].messages.len(), 1);
    assert!(requests[0].tools.is_empty());
    Ok(())
}

#[test]
fn builder_requires_a_model() {
    let err = ToolAgent::builder("orphan").build().err();
    assert!(matches!(err, Some(InsightsError::Config(_))));
}

#[tokio::test]
async fn mux_agent_carries_its_name() -> AnyResult<()> {
    let (llm, _) = ScriptedLlm::new(Vec::new());
    let (tools, _) = registry();
    let agent = mux_agent(llm, tools)?;
    assert_eq!(agent.name(), MUX_AGENT_NAME);
    assert!(agent.instructions().contains("Fetch analytics"));
    Ok(())
}
