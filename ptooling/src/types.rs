//! Tool definitions and dispatch outputs.

use serde::Serialize;
use serde_json::Value;

use crate::ToolError;

/// Advertised name, description and JSON Schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Result of one dispatched tool call. Errors are data, never a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub is_error: bool,
    pub payload: Value,
}

impl ToolOutput {
    pub fn success(payload: Value) -> Self {
        Self {
            is_error: false,
            payload,
        }
    }

    pub fn failure(error: &ToolError) -> Self {
        Self {
            is_error: true,
            payload: error.payload(),
        }
    }
}

pub fn to_payload<T>(value: &T) -> Result<Value, ToolError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value)
        .map_err(|err| ToolError::execution(format!("failed to encode tool output: {err}")))
}
