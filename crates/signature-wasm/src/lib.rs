//! # signature-wasm
//!
//! WASM compilation target for signature-core.
//!
//! Model calls happen outside WASM; this module exposes schema inspection
//! and extraction so a browser or edge host can validate completions with
//! the same rules as the native host.

use serde::{Deserialize, Serialize};
use signature_core::{extract_values, ExtractionError, FieldSpec, Signature};
use wasm_bindgen::prelude::*;

/// Input to the extraction function
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractInput {
    /// Signature source, e.g. "question -> answer"
    pub signature: String,

    /// Optional task description
    #[serde(default)]
    pub description: Option<String>,

    /// The raw model completion
    pub completion: String,
}

/// Output of the extraction function
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractOutput {
    /// Every output field conformed
    Values { values: serde_json::Value },

    /// The completion did not conform
    Invalid {
        message: String,
        field: FieldSpec,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_value: Option<String>,
    },
}

/// Extract typed values from a completion
///
/// Schema errors are returned as `Err`; a non-conforming completion is a
/// successful call with an `invalid` result so the host can re-prompt.
///
/// # Example
///
/// ```javascript
/// const input = {
///   signature: 'question -> answer, score:number',
///   completion: 'Answer: yes\nScore: 0.9'
/// };
/// const result = JSON.parse(extract(JSON.stringify(input)));
/// // { type: "values", values: { answer: "yes", score: 0.9 } }
/// ```
#[wasm_bindgen]
pub fn extract(input_json: &str) -> Result<String, JsValue> {
    let input: ExtractInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid input JSON: {}", e)))?;

    let signature = build_signature(&input.signature, input.description)?;

    let output = match extract_values(&signature, &input.completion) {
        Ok(values) => ExtractOutput::Values {
            values: serde_json::to_value(&values)
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize values: {}", e)))?,
        },
        Err(err) => {
            let raw_value = match &err {
                ExtractionError::Validation(e) => Some(e.raw_value.clone()),
                ExtractionError::MissingField(_) => None,
            };
            ExtractOutput::Invalid {
                message: err.to_string(),
                field: err.field().clone(),
                raw_value,
            }
        }
    };

    serde_json::to_string(&output)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))
}

/// Describe the normalized fields of a signature as JSON
#[wasm_bindgen]
pub fn describe_signature(source: &str) -> Result<String, JsValue> {
    let signature = build_signature(source, None)?;
    let description = serde_json::json!({
        "inputs": signature.input_fields(),
        "outputs": signature.output_fields(),
    });
    serde_json::to_string(&description)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize fields: {}", e)))
}

fn build_signature(source: &str, description: Option<String>) -> Result<Signature, JsValue> {
    let signature = match description {
        Some(description) => Signature::with_description(source, description),
        None => Signature::new(source),
    };
    signature.map_err(|e| JsValue::from_str(&format!("Invalid signature: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(signature: &str, completion: &str) -> ExtractOutput {
        let input = ExtractInput {
            signature: signature.to_string(),
            description: None,
            completion: completion.to_string(),
        };
        let input_json = serde_json::to_string(&input).unwrap();
        let output_json = extract(&input_json).unwrap();
        serde_json::from_str(&output_json).unwrap()
    }

    #[test]
    fn test_extract_values() {
        match run("q -> answer, score:number", "Answer: yes\nScore: 0.9") {
            ExtractOutput::Values { values } => {
                assert_eq!(values, serde_json::json!({"answer": "yes", "score": 0.9}));
            }
            _ => panic!("Expected values"),
        }
    }

    #[test]
    fn test_extract_invalid() {
        match run("q -> score:number", "Score: high") {
            ExtractOutput::Invalid {
                field, raw_value, ..
            } => {
                assert_eq!(field.name, "score");
                assert_eq!(raw_value.as_deref(), Some("high"));
            }
            _ => panic!("Expected invalid"),
        }
    }

    #[test]
    fn test_extract_missing_field() {
        match run("q -> answer", "no anchors here") {
            ExtractOutput::Invalid { raw_value, message, .. } => {
                assert!(raw_value.is_none());
                assert!(message.contains("Answer:"));
            }
            _ => panic!("Expected invalid"),
        }
    }

    #[test]
    fn test_describe_signature() {
        let json = describe_signature("userQuery -> tags:string[]").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["inputs"][0]["title"], "User Query");
        assert_eq!(value["outputs"][0]["type"]["name"], "string");
        assert_eq!(value["outputs"][0]["type"]["isArray"], true);
    }
}
