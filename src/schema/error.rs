use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema `{0}` not registered")]
    NotRegistered(String),
    #[error("schema validation failed at `{}`: {message}", display_path(.path))]
    Validation { message: String, path: Vec<String> },
}

impl SchemaError {
    pub(crate) fn at(path: &[String], message: impl Into<String>) -> Self {
        SchemaError::Validation {
            message: message.into(),
            path: path.to_vec(),
        }
    }

    pub fn path(&self) -> &[String] {
        match self {
            SchemaError::Validation { path, .. } => path,
            SchemaError::NotRegistered(_) => &[],
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        format!("$.{}", path.join("."))
    }
}
