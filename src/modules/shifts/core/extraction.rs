use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untrusted key/value output of the vision engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawExtraction(Value);

impl RawExtraction {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Pulls the outermost `{...}` block out of free-form model text.
    ///
    /// Text without a parseable object yields a `null` extraction.
    pub fn from_model_text(text: &str) -> Self {
        let block = match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => &text[start..=end],
            _ => return Self(Value::Null),
        };
        Self(serde_json::from_str(block).unwrap_or(Value::Null))
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawExtraction {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// First non-null value among `keys`.
pub fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}
