use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use mux_insights::{
    discover_tools, schema_exports, AgentMessage, AppContext, Credentials, LoggingConfig, RunArgs,
    INSIGHTS_WORKFLOW_ID, MUX_AGENT_KEY,
};

#[derive(Parser)]
#[command(name = "mux-insights", version, about = "Mux video insights via an MCP-backed agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered agents
    Agents,
    /// List registered workflows
    Workflows,
    /// Connect to the Mux tool provider and list its tools
    Tools,
    /// Run a workflow and print its JSON result
    Run {
        #[arg(long, default_value = INSIGHTS_WORKFLOW_ID)]
        workflow: String,
        /// Raw JSON input; overrides the individual flags
        #[arg(
            long,
            conflicts_with_all = ["identifier_type", "identifier", "include_analytics", "start", "end"]
        )]
        input: Option<String>,
        #[arg(long)]
        identifier_type: Option<String>,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long)]
        include_analytics: bool,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Send one prompt to an agent
    Ask {
        prompt: String,
        #[arg(long, default_value = MUX_AGENT_KEY)]
        agent: String,
    },
    /// Print the workflow input/output JSON schemas
    Schema {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let logger = LoggingConfig::default();
    logger.init();

    let cli = Cli::parse();
    match cli.command {
        Command::Agents => handle_agents(logger).await?,
        Command::Workflows => handle_workflows(logger).await?,
        Command::Tools => handle_tools().await?,
        Command::Run {
            workflow,
            input,
            identifier_type,
            identifier,
            include_analytics,
            start,
            end,
        } => {
            let input = match input {
                Some(raw) => serde_json::from_str(&raw)?,
                None => RunArgs {
                    identifier_type,
                    identifier,
                    include_analytics,
                    start,
                    end,
                }
                .into_input()?,
            };
            handle_run(logger, &workflow, input).await?
        }
        Command::Ask { prompt, agent } => handle_ask(logger, &agent, prompt).await?,
        Command::Schema { compact } => handle_schema(!compact)?,
    }
    Ok(())
}

async fn handle_agents(logger: LoggingConfig) -> anyhow::Result<()> {
    let app = AppContext::bootstrap(logger).await?;
    println!("{:<16} {:<20} {}", "Key", "Name", "Tools");
    for (key, agent) in app.host.agents() {
        println!("{:<16} {:<20} {}", key, agent.name(), app.tools.len());
    }
    Ok(())
}

async fn handle_workflows(logger: LoggingConfig) -> anyhow::Result<()> {
    let app = AppContext::bootstrap(logger).await?;
    println!("{:<24} {}", "Id", "Description");
    for (id, workflow) in app.host.workflows() {
        println!("{:<24} {}", id, workflow.description());
    }
    Ok(())
}

async fn handle_tools() -> anyhow::Result<()> {
    let credentials = Credentials::from_env()?;
    let tools = discover_tools(&credentials).await?;
    if tools.is_empty() {
        println!("The tool provider exposed no tools");
    }
    for spec in tools.specs() {
        println!("{:<40} {}", spec.name, first_line(&spec.description));
    }
    Ok(())
}

async fn handle_run(logger: LoggingConfig, workflow: &str, input: Value) -> anyhow::Result<()> {
    let app = AppContext::bootstrap(logger).await?;
    let output = app.host.run_workflow(workflow, input).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn handle_ask(logger: LoggingConfig, agent: &str, prompt: String) -> anyhow::Result<()> {
    let app = AppContext::bootstrap(logger).await?;
    let response = app
        .host
        .generate(agent, vec![AgentMessage::user(prompt)])
        .await?;
    println!("{}", response.text);
    if !response.tool_calls.is_empty() {
        let names: Vec<&str> = response.tool_calls.iter().map(|c| c.name.as_str()).collect();
        eprintln!("tools used: {}", names.join(", "));
    }
    Ok(())
}

fn handle_schema(pretty: bool) -> anyhow::Result<()> {
    let value = json!(schema_exports());
    let content = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{content}");
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
