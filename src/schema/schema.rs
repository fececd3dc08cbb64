use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Shape of a JSON value accepted by a workflow or step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SchemaKind {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
    },
    #[serde(rename = "enum")]
    Enum { values: Vec<String> },
    #[serde(rename = "object")]
    Object {
        properties: BTreeMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
        #[serde(default = "Schema::allow_additional")]
        additional: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            name: None,
            kind,
            description: None,
            default: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String { min_length: None })
    }

    pub fn non_empty_string() -> Self {
        Self::new(SchemaKind::String {
            min_length: Some(1),
        })
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Builds an object schema. Properties listed in `required` must be present.
    pub fn object<I>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
    {
        Self::new(SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|name| name.to_string()).collect(),
            additional: true,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn deny_additional(mut self) -> Self {
        if let SchemaKind::Object { additional, .. } = &mut self.kind {
            *additional = false;
        }
        self
    }

    /// Renders the schema as a standard JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        let mut out = match &self.kind {
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::String { min_length } => match min_length {
                Some(min) => json!({ "type": "string", "minLength": min }),
                None => json!({ "type": "string" }),
            },
            SchemaKind::Enum { values } => json!({ "type": "string", "enum": values }),
            SchemaKind::Object {
                properties,
                required,
                additional,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
                    .collect();
                json!({
                    "type": "object",
                    "properties": props,
                    "required": required,
                    "additionalProperties": additional,
                })
            }
        };
        if let Some(description) = &self.description {
            out["description"] = json!(description);
        }
        if let Some(default) = &self.default {
            out["default"] = default.clone();
        }
        out
    }

    fn allow_additional() -> bool {
        true
    }
}
