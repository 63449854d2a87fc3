//! Field descriptors and their normalization.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::title::to_title;

/// The closed set of scalar kinds a field value can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
}

impl ScalarKind {
    /// Parse a kind from its type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Declared type of a field: a scalar kind, optionally as a homogeneous array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    #[serde(rename = "name")]
    pub kind: ScalarKind,
    #[serde(rename = "isArray", default)]
    pub is_array: bool,
}

impl FieldType {
    pub fn scalar(kind: ScalarKind) -> Self {
        Self {
            kind,
            is_array: false,
        }
    }

    pub fn array(kind: ScalarKind) -> Self {
        Self {
            kind,
            is_array: true,
        }
    }

    /// Human-readable shape used in error messages and prompts,
    /// e.g. `number` or `array of number`.
    pub fn expected_shape(&self) -> String {
        if self.is_array {
            format!("array of {}", self.kind.as_str())
        } else {
            self.kind.as_str().to_string()
        }
    }
}

/// A normalized field: name and title are always non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
}

impl FieldSpec {
    /// The anchor that introduces this field's value in a completion
    pub fn prefix(&self) -> String {
        format!("{}:", self.title)
    }
}

/// Type declaration as produced by a grammar parser, not yet checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFieldType {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isArray", default)]
    pub is_array: bool,
}

/// A tentative field descriptor, as produced by a grammar parser or
/// supplied by a caller appending fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<RawFieldType>,
}

impl RawField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, name: impl Into<String>, is_array: bool) -> Self {
        self.field_type = Some(RawFieldType {
            name: name.into(),
            is_array,
        });
        self
    }

    /// Validate and complete this descriptor.
    ///
    /// Fails when the name is empty, or when a type is declared without a
    /// kind or with a kind outside the scalar set. A missing title is
    /// derived from the name.
    pub fn normalize(&self) -> Result<FieldSpec, SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingFieldName);
        }

        let title = match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                let derived = to_title(&self.name);
                // A name made only of separators derives to nothing
                if derived.is_empty() {
                    self.name.clone()
                } else {
                    derived
                }
            }
        };

        let field_type = match &self.field_type {
            None => None,
            Some(raw) if raw.name.is_empty() => {
                return Err(SchemaError::MissingTypeName(self.name.clone()));
            }
            Some(raw) => {
                let kind = ScalarKind::from_name(&raw.name).ok_or_else(|| {
                    SchemaError::UnknownTypeName {
                        field: self.name.clone(),
                        kind: raw.name.clone(),
                    }
                })?;
                Some(FieldType {
                    kind,
                    is_array: raw.is_array,
                })
            }
        };

        Ok(FieldSpec {
            name: self.name.clone(),
            title,
            description: self.description.clone(),
            field_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_derived_from_name() {
        let field = RawField::new("final_answer").normalize().unwrap();
        assert_eq!(field.title, "Final answer");
        assert_eq!(field.prefix(), "Final answer:");
    }

    #[test]
    fn test_explicit_title_kept() {
        let field = RawField::new("answer")
            .with_title("Result")
            .normalize()
            .unwrap();
        assert_eq!(field.title, "Result");
    }

    #[test]
    fn test_empty_title_is_derived() {
        let field = RawField::new("answer").with_title("").normalize().unwrap();
        assert_eq!(field.title, "Answer");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = RawField::new("").normalize().unwrap_err();
        assert_eq!(err, SchemaError::MissingFieldName);
        assert_eq!(err.to_string(), "Field name is required");
    }

    #[test]
    fn test_empty_type_name_rejected() {
        let err = RawField::new("score")
            .with_type("", false)
            .normalize()
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingTypeName("score".to_string()));
        assert_eq!(err.to_string(), "Field type name is required: score");
    }

    #[test]
    fn test_unknown_type_name_rejected() {
        let err = RawField::new("when")
            .with_type("date", false)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTypeName { ref kind, .. } if kind == "date"));
    }

    #[test]
    fn test_typed_field() {
        let field = RawField::new("scores")
            .with_type("number", true)
            .normalize()
            .unwrap();
        assert_eq!(field.field_type, Some(FieldType::array(ScalarKind::Number)));
        assert_eq!(field.field_type.unwrap().expected_shape(), "array of number");
    }

    #[test]
    fn test_separator_only_name_keeps_name_as_title() {
        let field = RawField::new("_").normalize().unwrap();
        assert_eq!(field.title, "_");
    }

    #[test]
    fn test_raw_field_from_json() {
        let raw: RawField = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "description": "keywords",
            "type": { "name": "string", "isArray": true }
        }))
        .unwrap();
        let field = raw.normalize().unwrap();
        assert_eq!(field.title, "Tags");
        assert_eq!(field.description.as_deref(), Some("keywords"));
        assert_eq!(field.field_type, Some(FieldType::array(ScalarKind::String)));
    }
}
