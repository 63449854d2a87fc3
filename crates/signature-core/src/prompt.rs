//! Prompt rendering for a signature.
//!
//! The rendered output template lists every output field as `Title: ...`,
//! the same anchors [`extract_values`](crate::extract_values) searches for.

use serde_json::{Map, Value as Json};
use thiserror::Error;

use crate::field::{FieldSpec, ScalarKind};
use crate::signature::Signature;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Missing value for input field: {0}")]
    MissingInput(String),
}

/// Render a full prompt: description, input values and output template.
///
/// `inputs` is keyed by field name; every input field needs a value.
/// String values are inserted verbatim, anything else as JSON.
pub fn render_prompt(signature: &Signature, inputs: &Map<String, Json>) -> Result<String, PromptError> {
    let mut prompt = String::new();

    if let Some(description) = signature.description() {
        prompt.push_str(description);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&output_format(signature));
    prompt.push_str("\n---\n\n");

    for field in signature.input_fields() {
        let value = inputs
            .get(&field.name)
            .ok_or_else(|| PromptError::MissingInput(field.name.clone()))?;

        prompt.push_str(&field.prefix());
        prompt.push(' ');
        match value {
            Json::String(s) => prompt.push_str(s),
            other => prompt.push_str(&other.to_string()),
        }
        prompt.push('\n');
    }

    if let Some(first) = signature.output_fields().first() {
        prompt.push_str(&first.prefix());
    }

    Ok(prompt)
}

/// Render only the output template
pub fn output_format(signature: &Signature) -> String {
    let mut out = String::from("Follow the following format.\n\n");

    for field in signature.input_fields().iter().chain(signature.output_fields()) {
        out.push_str(&field.prefix());
        out.push(' ');
        out.push_str(&placeholder(field));
        out.push('\n');
    }

    out.push_str("---");
    out
}

fn placeholder(field: &FieldSpec) -> String {
    let hint = field.description.as_deref().unwrap_or(&field.title);
    match field.field_type {
        Some(t) if t.is_array || t.kind != ScalarKind::String => {
            format!("${{{}}} (JSON {})", hint, t.expected_shape())
        }
        _ => format!("${{{}}}", hint),
    }
}
