use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Non-streaming completion returned by the upstream
///
/// Wraps the decoded body as-is. Accessors are read-only views that return
/// `None` for fields that are missing, `null` or of an unexpected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionResponse(Value);

impl CompletionResponse {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn model(&self) -> Option<&str> {
        self.0.get("model").and_then(Value::as_str)
    }

    /// Generated choices, empty unless `choices` is an array
    pub fn choices(&self) -> &[Value] {
        self.0.get("choices").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
    }

    /// Text of the first choice, if any
    pub fn text(&self) -> Option<&str> {
        self.0.pointer("/choices/0/message/content").and_then(Value::as_str)
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.0.pointer("/choices/0/finish_reason").and_then(Value::as_str)
    }

    /// Top-level field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for CompletionResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
