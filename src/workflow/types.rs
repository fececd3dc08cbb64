use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Asset,
    Playback,
}

impl IdentifierType {
    pub const ALL: [&'static str; 2] = ["asset", "playback"];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Asset => "asset",
            IdentifierType::Playback => "playback",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Input of the `mux-video-insights` workflow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub identifier_type: IdentifierType,
    pub identifier: String,
    #[serde(default)]
    pub include_analytics: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl InsightsRequest {
    pub fn new(identifier_type: IdentifierType, identifier: impl Into<String>) -> Self {
        Self {
            identifier_type,
            identifier: identifier.into(),
            include_analytics: false,
            date_range: None,
        }
    }

    pub fn with_analytics(mut self, date_range: Option<DateRange>) -> Self {
        self.include_analytics = true;
        self.date_range = date_range;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfoRequest {
    pub identifier_type: IdentifierType,
    pub identifier: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfoOutput {
    pub info_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub identifier_type: IdentifierType,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOutput {
    pub analytics_text: String,
}

/// Output of the `mux-video-insights` workflow. `analyticsText` is omitted,
/// not blank, when analytics were not requested.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResult {
    pub info_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_text: Option<String>,
}

/// Which steps a run will execute, fixed before the first step starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsightsPlan {
    InfoOnly(InfoRequest),
    InfoAndAnalytics(InfoRequest, AnalyticsRequest),
}

impl InsightsPlan {
    pub fn from_request(request: &InsightsRequest) -> Self {
        let info = InfoRequest {
            identifier_type: request.identifier_type,
            identifier: request.identifier.clone(),
        };
        if request.include_analytics {
            let analytics = AnalyticsRequest {
                identifier_type: request.identifier_type,
                identifier: request.identifier.clone(),
                date_range: request.date_range.clone(),
            };
            InsightsPlan::InfoAndAnalytics(info, analytics)
        } else {
            InsightsPlan::InfoOnly(info)
        }
    }

    pub fn includes_analytics(&self) -> bool {
        matches!(self, InsightsPlan::InfoAndAnalytics(..))
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowState {
    NotStarted,
    InfoFetched,
    AnalyticsFetched,
    Completed,
}

/// A finished run: its trace of states and the merged result.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub run_id: String,
    pub workflow: String,
    pub states: Vec<WorkflowState>,
    pub result: InsightsResult,
}
