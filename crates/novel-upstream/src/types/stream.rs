use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One incremental chunk of a streamed completion
///
/// Decoded from a single `data:` line of the upstream body and kept as the
/// upstream sent it, so relaying it re-emits the same JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamEvent(Value);

impl StreamEvent {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn model(&self) -> Option<&str> {
        self.0.get("model").and_then(Value::as_str)
    }

    pub fn choices(&self) -> &[Value] {
        self.0.get("choices").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
    }

    /// Concatenated content fragments across all choices
    pub fn text(&self) -> String {
        self.choices()
            .iter()
            .filter_map(|choice| choice.pointer("/delta/content").and_then(Value::as_str))
            .collect()
    }

    /// Role announced by the first choice, usually only on the first chunk
    pub fn role(&self) -> Option<&str> {
        self.0.pointer("/choices/0/delta/role").and_then(Value::as_str)
    }

    /// Present on the final chunk of a choice
    pub fn finish_reason(&self) -> Option<&str> {
        self.0.pointer("/choices/0/finish_reason").and_then(Value::as_str)
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for StreamEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
