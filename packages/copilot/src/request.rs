use serde_json::Value;

use crate::error::CopilotError;

/// Body accepted by the copilot endpoint.
///
/// Only a body that is not JSON at all is rejected outright. Fields that are
/// absent or not strings read as `None`, so a keyless caller always sees the
/// missing-key error before any complaint about the prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopilotRequest {
    /// Per-request key; overrides the configured fallback
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub system: Option<String>,
}

impl CopilotRequest {
    pub fn parse(body: &[u8]) -> Result<Self, CopilotError> {
        let value: Value = serde_json::from_slice(body).map_err(CopilotError::MalformedInput)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            api_key: field("apiKey"),
            model: field("model"),
            prompt: field("prompt"),
            system: field("system"),
        }
    }
}
