//! Coercion of completion spans into typed values.
//!
//! Non-string and array fields are decoded as strict JSON, then checked
//! against the declared shape. Scalar string fields take the span verbatim.

use serde_json::Value as Json;

use crate::error::ValidationError;
use crate::field::{FieldSpec, FieldType, ScalarKind};
use crate::value::Value;

/// Decode and validate a trimmed span against a declared field type.
pub fn validate_value(
    field: &FieldSpec,
    field_type: FieldType,
    raw: &str,
) -> Result<Value, ValidationError> {
    if !field_type.is_array && field_type.kind == ScalarKind::String {
        return Ok(Value::String(raw.to_string()));
    }

    let decoded: Json = serde_json::from_str(raw).map_err(|_| {
        ValidationError::new(
            format!("Error, expected '{}' got '{}'", field_type.expected_shape(), raw),
            field,
            raw,
        )
    })?;

    if field_type.is_array {
        let items = match decoded {
            Json::Array(items) => items,
            other => {
                return Err(ValidationError::new(
                    format!("Expected an array, but got '{}'.", json_type_name(&other)),
                    field,
                    raw,
                ));
            }
        };

        let check = ItemCheck {
            field,
            kind: field_type.kind,
            raw,
        };

        return match field_type.kind {
            ScalarKind::String => check.collect(items, take_string).map(Value::StringArray),
            ScalarKind::Number => check.collect(items, take_number).map(Value::NumberArray),
            ScalarKind::Boolean => check.collect(items, take_bool).map(Value::BooleanArray),
        };
    }

    let scalar = match (field_type.kind, &decoded) {
        (ScalarKind::Number, Json::Number(n)) => Some(Value::Number(n.clone())),
        (ScalarKind::Boolean, Json::Bool(b)) => Some(Value::Boolean(*b)),
        _ => None,
    };

    scalar.ok_or_else(|| {
        ValidationError::new(
            format!(
                "Expected value of type '{}', but got '{}'.",
                field_type.kind.as_str(),
                json_type_name(&decoded)
            ),
            field,
            raw,
        )
    })
}

struct ItemCheck<'a> {
    field: &'a FieldSpec,
    kind: ScalarKind,
    raw: &'a str,
}

impl ItemCheck<'_> {
    /// Convert every item or fail on the first one of the wrong type
    fn collect<T>(
        &self,
        items: Vec<Json>,
        pick: impl Fn(Json) -> Option<T>,
    ) -> Result<Vec<T>, ValidationError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let type_name = json_type_name(&item);
            match pick(item) {
                Some(value) => out.push(value),
                None => {
                    return Err(ValidationError::new(
                        format!(
                            "Expected all items in array to be of type '{}', but found an item of type '{}' at index {}.",
                            self.kind.as_str(),
                            type_name,
                            index
                        ),
                        self.field,
                        self.raw,
                    ));
                }
            }
        }
        Ok(out)
    }
}

fn take_string(value: Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s),
        _ => None,
    }
}

fn take_number(value: Json) -> Option<serde_json::Number> {
    match value {
        Json::Number(n) => Some(n),
        _ => None,
    }
}

fn take_bool(value: Json) -> Option<bool> {
    value.as_bool()
}

/// Loose type name for messages: null, arrays and objects
/// all report as `object`.
fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::String(_) => "string",
        Json::Number(_) => "number",
        Json::Bool(_) => "boolean",
        Json::Null | Json::Array(_) | Json::Object(_) => "object",
    }
}
