use std::collections::BTreeMap;

use serde_json::Value;

use super::error::SchemaError;
use super::schema::Schema;

/// Named schemas, owned by whoever validates against them.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    pub fn snapshot(&self) -> Vec<(String, Schema)> {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> std::result::Result<&Schema, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotRegistered(name.to_string()))
    }

    pub fn validate(&self, name: &str, value: &Value) -> std::result::Result<(), SchemaError> {
        let schema = self.get(name)?;
        super::validation::validate_value(schema, value, &mut Vec::new())
    }
}
