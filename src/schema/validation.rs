use serde_json::Value;

use super::error::SchemaError;
use super::schema::{Schema, SchemaKind};

/// Checks `value` against `schema`, reporting the first violation with its path.
pub fn validate_value(
    schema: &Schema,
    value: &Value,
    path: &mut Vec<String>,
) -> std::result::Result<(), SchemaError> {
    match &schema.kind {
        SchemaKind::Boolean => {
            if !value.is_boolean() {
                return Err(SchemaError::at(path, "expected boolean"));
            }
        }
        SchemaKind::Number => {
            if !value.is_number() {
                return Err(SchemaError::at(path, "expected number"));
            }
        }
        SchemaKind::String { min_length } => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaError::at(path, "expected string"))?;
            if let Some(min) = min_length {
                if text.chars().count() < *min {
                    return Err(SchemaError::at(
                        path,
                        format!("string must contain at least {min} character(s)"),
                    ));
                }
            }
        }
        SchemaKind::Enum { values } => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaError::at(path, "expected string"))?;
            if !values.iter().any(|allowed| allowed == text) {
                return Err(SchemaError::at(
                    path,
                    format!("expected one of [{}], got `{text}`", values.join(", ")),
                ));
            }
        }
        SchemaKind::Object {
            properties,
            required,
            additional,
        } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaError::at(path, "expected object"))?;

            for key in required {
                if !object.contains_key(key) {
                    let mut required_path = path.clone();
                    required_path.push(key.clone());
                    return Err(SchemaError::at(
                        &required_path,
                        format!("missing required property `{key}`"),
                    ));
                }
            }

            for (key, val) in object {
                if let Some(sub_schema) = properties.get(key) {
                    path.push(key.clone());
                    validate_value(sub_schema, val, path)?;
                    path.pop();
                } else if !additional {
                    let mut extra_path = path.clone();
                    extra_path.push(key.clone());
                    return Err(SchemaError::at(
                        &extra_path,
                        format!("unexpected property `{key}`"),
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_rejects_unknown_value() {
        let schema = Schema::one_of(["asset", "playback"]);
        assert!(validate_value(&schema, &json!("asset"), &mut Vec::new()).is_ok());
        let err = validate_value(&schema, &json!("live"), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("asset, playback"));
    }

    #[test]
    fn min_length_counts_characters() {
        let schema = Schema::non_empty_string();
        assert!(validate_value(&schema, &json!(""), &mut Vec::new()).is_err());
        assert!(validate_value(&schema, &json!("x"), &mut Vec::new()).is_ok());
    }

    #[test]
    fn nested_errors_report_path() {
        let schema = Schema::object(
            [(
                "dateRange",
                Schema::object([("start", Schema::string())], &["start"]),
            )],
            &[],
        );
        let err = validate_value(&schema, &json!({ "dateRange": {} }), &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.path(), ["dateRange".to_string(), "start".to_string()]);
    }
}
