//! The extracted field mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::prompt::{FIELD_NAMES, LEPROSY_TYPES, MDT_STATUSES};
use crate::Result;

/// Fields extracted from one card image.
///
/// Holds the model's answer exactly as parsed. The model is asked for an
/// object keyed by [`FIELD_NAMES`], but nothing enforces that, so any JSON
/// value is relayed unchanged. The field accessors only see into objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    value: Value,
}

/// A field whose value is outside the set the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl ExtractionResult {
    /// Parse the model's message content. Any valid JSON is accepted.
    pub fn parse(content: &str) -> Result<Self> {
        let value = serde_json::from_str(content)?;
        Ok(Self { value })
    }

    /// The top-level object, if the model answered with one.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    pub fn is_object(&self) -> bool {
        self.value.is_object()
    }

    /// Name of the top-level JSON type, for logs.
    pub fn json_kind(&self) -> &'static str {
        match &self.value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Look up a raw value. `null` is returned as `Some(Value::Null)`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object()?.get(field)
    }

    /// String value of a field; `null`, missing and non-string values are `None`.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Whether the field is missing or explicitly `null`.
    pub fn is_absent(&self, field: &str) -> bool {
        matches!(self.get(field), None | Some(Value::Null))
    }

    /// Expected fields the model left out entirely (as opposed to `null`).
    ///
    /// A non-object answer carries none of them.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FIELD_NAMES
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none())
            .collect()
    }

    /// Check the enumerated fields against the values the prompt allows.
    ///
    /// Nothing is rewritten; callers decide what to do with the warnings.
    /// Non-object answers have no fields to check.
    pub fn check_enumerations(&self) -> Vec<FieldWarning> {
        [
            ("leprosy_type", LEPROSY_TYPES),
            ("mdt_status", MDT_STATUSES),
        ]
        .into_iter()
        .filter_map(|(field, allowed)| {
            let value = self.get(field)?;
            let ok = match value {
                Value::Null => true,
                Value::String(s) => allowed.contains(&s.as_str()),
                _ => false,
            };
            (!ok).then(|| FieldWarning {
                field,
                value: value.to_string(),
                allowed,
            })
        })
        .collect()
    }

    /// Number of top-level keys; zero for non-object answers.
    pub fn len(&self) -> usize {
        self.as_object().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}
