//! Typed values produced by extraction.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Number;

/// A value extracted for one field: one of six closed shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(Number),
    Boolean(bool),
    StringArray(Vec<String>),
    NumberArray(Vec<Number>),
    BooleanArray(Vec<bool>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::StringArray(_) | Self::NumberArray(_) | Self::BooleanArray(_)
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::StringArray(items) => items.iter().cloned().map(serde_json::Value::String).collect(),
            Self::NumberArray(items) => items.iter().cloned().map(serde_json::Value::Number).collect(),
            Self::BooleanArray(items) => items.iter().copied().map(serde_json::Value::Bool).collect(),
        }
    }
}

/// Field name to value mapping, in declared output order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedValues {
    entries: Vec<(String, Value)>,
}

impl ExtractedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
