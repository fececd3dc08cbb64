use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{InsightsError, Result};
use crate::workflow::{insights_input_schema, insights_output_schema, INSIGHTS_WORKFLOW_ID};

#[derive(Clone, Debug, Serialize)]
pub struct SchemaExportEntry {
    pub name: String,
    pub schema: Value,
}

/// JSON Schema documents for the insights workflow's input and output.
pub fn schema_exports() -> Vec<SchemaExportEntry> {
    vec![
        SchemaExportEntry {
            name: format!("{INSIGHTS_WORKFLOW_ID}.input"),
            schema: insights_input_schema().to_json_schema(),
        },
        SchemaExportEntry {
            name: format!("{INSIGHTS_WORKFLOW_ID}.output"),
            schema: insights_output_schema().to_json_schema(),
        },
    ]
}

/// Flag-style workflow input, before schema validation.
#[derive(Clone, Debug, Default)]
pub struct RunArgs {
    pub identifier_type: Option<String>,
    pub identifier: Option<String>,
    pub include_analytics: bool,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RunArgs {
    /// Builds the workflow's JSON input. Absent flags are left out so the
    /// workflow schema reports them.
    pub fn into_input(self) -> Result<Value> {
        let mut input = Map::new();
        if let Some(identifier_type) = self.identifier_type {
            input.insert("identifierType".into(), json!(identifier_type));
        }
        if let Some(identifier) = self.identifier {
            input.insert("identifier".into(), json!(identifier));
        }
        input.insert("includeAnalytics".into(), json!(self.include_analytics));
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                input.insert("dateRange".into(), json!({ "start": start, "end": end }));
            }
            (None, None) => {}
            _ => {
                return Err(InsightsError::Config(
                    "--start and --end must be given together".to_string(),
                ))
            }
        }
        Ok(Value::Object(input))
    }
}
