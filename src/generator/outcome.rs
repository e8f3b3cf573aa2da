use serde::{Serialize, Serializer};

use super::error::GeneratorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { description: String },
    Failure { error: String },
}

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let envelope = match self {
            GenerationResult::Success { description } => Envelope {
                success: true,
                description: Some(description.as_str()),
                error: None,
            },
            GenerationResult::Failure { error } => Envelope {
                success: false,
                description: None,
                error: Some(error.as_str()),
            },
        };
        envelope.serialize(serializer)
    }
}

impl GenerationResult {
    pub fn success(description: impl Into<String>) -> Self {
        Self::Success {
            description: description.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn from_error(err: &GeneratorError) -> Self {
        Self::failure(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Single-line JSON envelope written to stdout.
    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            Err(err) => format!(
                "{{\"success\":false,\"error\":{}}}",
                serde_json::Value::String(format!("serializing result: {err}"))
            ),
        }
    }
}

impl From<GeneratorError> for GenerationResult {
    fn from(err: GeneratorError) -> Self {
        Self::from_error(&err)
    }
}
