use super::step::Step;
use super::types::{AnalyticsOutput, AnalyticsRequest, IdentifierType, InfoOutput, InfoRequest};
use crate::schema::Schema;

pub const INFO_STEP_ID: &str = "mux-video-info-step";
pub const ANALYTICS_STEP_ID: &str = "mux-video-analytics-step";

const DEFAULT_DATE_RANGE: &str = "Date range: default or recent period";

pub(crate) fn identifier_type_schema() -> Schema {
    Schema::one_of(IdentifierType::ALL)
        .with_description("Whether the identifier is an asset ID or a playback ID")
}

pub(crate) fn identifier_schema() -> Schema {
    Schema::non_empty_string().with_description("Asset ID or Playback ID")
}

pub(crate) fn date_range_schema() -> Schema {
    Schema::object(
        [
            (
                "start",
                Schema::string().with_description("ISO date start (e.g., 2024-01-01)"),
            ),
            (
                "end",
                Schema::string().with_description("ISO date end (e.g., 2024-01-31)"),
            ),
        ],
        &["start", "end"],
    )
}

/// Fetches core video details.
#[derive(Clone, Copy, Debug, Default)]
pub struct InfoStep;

impl Step for InfoStep {
    type Input = InfoRequest;
    type Output = InfoOutput;

    fn id(&self) -> &'static str {
        INFO_STEP_ID
    }

    fn description(&self) -> &'static str {
        "Fetch Mux video info using MCP tools via the agent"
    }

    fn input_schema(&self) -> Schema {
        Schema::object(
            [
                ("identifierType", identifier_type_schema()),
                ("identifier", identifier_schema()),
            ],
            &["identifierType", "identifier"],
        )
    }

    fn output_schema(&self) -> Schema {
        Schema::object([("infoText", Schema::string())], &["infoText"])
    }

    fn render_prompt(&self, input: &InfoRequest) -> String {
        format!(
            "
Return concise JSON-like details for this Mux video.
Identifier type: {}
Identifier: {}

Use the available Mux MCP tools to fetch core details:
- Title/Name (if available)
- Status
- Duration
- Created at
- Playback IDs
- Asset ID
- Any other notable properties

Respond in clear, readable text.
",
            input.identifier_type, input.identifier
        )
    }

    fn into_output(&self, text: String) -> InfoOutput {
        InfoOutput { info_text: text }
    }
}

/// Fetches viewing KPIs, over the requested or a default period.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticsStep;

impl Step for AnalyticsStep {
    type Input = AnalyticsRequest;
    type Output = AnalyticsOutput;

    fn id(&self) -> &'static str {
        ANALYTICS_STEP_ID
    }

    fn description(&self) -> &'static str {
        "Fetch Mux video analytics using MCP tools via the agent"
    }

    fn input_schema(&self) -> Schema {
        Schema::object(
            [
                ("identifierType", identifier_type_schema()),
                ("identifier", identifier_schema()),
                ("dateRange", date_range_schema()),
            ],
            &["identifierType", "identifier"],
        )
    }

    fn output_schema(&self) -> Schema {
        Schema::object([("analyticsText", Schema::string())], &["analyticsText"])
    }

    fn render_prompt(&self, input: &AnalyticsRequest) -> String {
        let date_range = match &input.date_range {
            Some(range) => format!("Date range: {} to {}", range.start, range.end),
            None => DEFAULT_DATE_RANGE.to_string(),
        };
        format!(
            "
Fetch key analytics for this Mux video using MCP tools:
Identifier type: {}
Identifier: {}
{date_range}

Include KPIs such as:
- Views/Plays
- Average Watch Time
- Completion Rate (if available)
- Errors or Quality metrics (rebuffering, startup time) if available

Respond in clear, readable text.
",
            input.identifier_type, input.identifier
        )
    }

    fn into_output(&self, text: String) -> AnalyticsOutput {
        AnalyticsOutput {
            analytics_text: text,
        }
    }
}
