//! Segmentation of a completion into per-field spans.
//!
//! Output fields are located left to right by their `Title:` anchors. Each
//! span runs from the end of its anchor to the start of the next field's
//! anchor, or to the end of the completion for the last field. Fields must
//! appear in declared order, each once.

use std::ops::Range;

use crate::error::ExtractionError;
use crate::field::FieldSpec;
use crate::signature::Signature;
use crate::validate::validate_value;
use crate::value::{ExtractedValues, Value};

/// One output field's raw span within a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub field: &'a FieldSpec,
    /// Byte range of the untrimmed span
    pub range: Range<usize>,
    /// The span with whitespace and a trailing `---` marker removed
    pub text: &'a str,
}

/// Split a completion into one span per output field, in declared order.
///
/// Fails with [`ExtractionError::MissingField`] when an anchor cannot be
/// found after the previous field's anchor.
pub fn segment<'a>(
    signature: &'a Signature,
    completion: &'a str,
) -> Result<Vec<Span<'a>>, ExtractionError> {
    let fields = signature.output_fields();
    let mut spans = Vec::with_capacity(fields.len());
    let mut cursor = 0;

    for (i, field) in fields.iter().enumerate() {
        let prefix = field.prefix();
        let start = find_from(completion, &prefix, cursor)
            .ok_or_else(|| ExtractionError::MissingField(field.clone()))?
            + prefix.len();

        let end = match fields.get(i + 1) {
            Some(next) => find_from(completion, &next.prefix(), start)
                .ok_or_else(|| ExtractionError::MissingField(next.clone()))?,
            None => completion.len(),
        };

        tracing::trace!(target: "signature", field = %field.name, start, end, "span_located");

        spans.push(Span {
            field,
            range: start..end,
            text: clean_span(&completion[start..end]),
        });
        cursor = start;
    }

    Ok(spans)
}

/// Extract a typed value for every output field of `signature`.
///
/// Untyped fields yield their span as a string. Typed fields are validated;
/// the first failure aborts extraction, so no partial mapping is returned.
pub fn extract_values(
    signature: &Signature,
    completion: &str,
) -> Result<ExtractedValues, ExtractionError> {
    let mut values = ExtractedValues::new();

    for span in segment(signature, completion)? {
        let value = match span.field.field_type {
            Some(field_type) => validate_value(span.field, field_type, span.text)?,
            None => Value::String(span.text.to_string()),
        };
        values.push(span.field.name.clone(), value);
    }

    tracing::debug!(target: "signature", fields = values.len(), "values_extracted");
    Ok(values)
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack[from..].find(needle).map(|i| i + from)
}

/// Trim, drop a trailing run of three or more hyphens, trim again
fn clean_span(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_marker = trimmed.trim_end_matches('-');
    if trimmed.len() - without_marker.len() >= 3 {
        without_marker.trim()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::RawField;

    fn signature(source: &str) -> Signature {
        Signature::new(source).unwrap()
    }

    #[test]
    fn test_untyped_and_number_array() {
        let mut sig = signature("question -> first");
        sig.add_output_field(RawField::new("second").with_type("number", true))
            .unwrap();

        let values = extract_values(&sig, "First: hello\nSecond: [1,2,3]\n---").unwrap();

        assert_eq!(values.get("first"), Some(&Value::String("hello".to_string())));
        assert_eq!(
            values.get("second"),
            Some(&Value::NumberArray(vec![1.into(), 2.into(), 3.into()]))
        );
        assert_eq!(values.names().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[test]
    fn test_invalid_number_references_field() {
        let sig = signature("q -> n:number");
        let err = extract_values(&sig, "N: abc").unwrap_err();

        match err {
            ExtractionError::Validation(ref e) => {
                assert_eq!(e.field.name, "n");
                assert_eq!(e.raw_value, "abc");
                assert_eq!(e.message, "Error, expected 'number' got 'abc'");
            }
            _ => panic!("Expected validation error"),
        }
        assert_eq!(err.field().name, "n");
    }

    #[test]
    fn test_boolean_array_element_mismatch() {
        let sig = signature("q -> flags:boolean[]");
        let err = extract_values(&sig, r#"Flags: [true, "x"]"#).unwrap_err();

        match err {
            ExtractionError::Validation(e) => {
                assert!(e.message.contains("'string' at index 1"));
            }
            _ => panic!("Expected validation error"),
        }
    }

    #[test]
    fn test_first_invalid_field_aborts() {
        let sig = signature("q -> count:number, ok:boolean");
        let err = extract_values(&sig, "Count: many\nOk: maybe").unwrap_err();
        assert_eq!(err.field().name, "count");
    }

    #[test]
    fn test_string_field_not_unquoted() {
        let sig = signature("q -> name:string");
        let values = extract_values(&sig, r#"Name: "Ada""#).unwrap();
        assert_eq!(values.get("name").and_then(Value::as_str), Some(r#""Ada""#));
    }

    #[test]
    fn test_multiline_values_and_preamble() {
        let sig = signature("q -> reasoning, answer");
        let completion = "Sure.\nReasoning: step one\nstep two\n\nAnswer:   42  \n";
        let values = extract_values(&sig, completion).unwrap();

        assert_eq!(values.get("reasoning").and_then(Value::as_str), Some("step one\nstep two"));
        assert_eq!(values.get("answer").and_then(Value::as_str), Some("42"));
    }

    #[test]
    fn test_completion_marker_stripped() {
        let sig = signature("q -> answer");
        let values = extract_values(&sig, "Answer: done -----  ").unwrap();
        assert_eq!(values.get("answer").and_then(Value::as_str), Some("done"));

        let values = extract_values(&sig, "Answer: a--").unwrap();
        assert_eq!(values.get("answer").and_then(Value::as_str), Some("a--"));
    }

    #[test]
    fn test_empty_value() {
        let sig = signature("q -> first, second");
        let values = extract_values(&sig, "First:Second: x").unwrap();
        assert_eq!(values.get("first").and_then(Value::as_str), Some(""));
        assert_eq!(values.get("second").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_missing_field() {
        let sig = signature("q -> answer, confidence:number");
        let err = extract_values(&sig, "Answer: yes").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingField(ref f) if f.name == "confidence"));

        let err = extract_values(&sig, "nothing useful").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingField(ref f) if f.name == "answer"));
    }

    #[test]
    fn test_out_of_order_fields_are_missing() {
        let sig = signature("q -> answer, notes");
        let err = extract_values(&sig, "Notes: n\nAnswer: a").unwrap_err();
        assert_eq!(err.field().name, "notes");
    }

    #[test]
    fn test_spans_carry_ranges() {
        let sig = signature("q -> answer");
        let completion = "Answer:  hi ";
        let spans = segment(&sig, completion).unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 7..completion.len());
        assert_eq!(spans[0].text, "hi");
    }

    #[test]
    fn test_unicode_text_around_anchors() {
        let sig = signature("q -> answer, note");
        let values = extract_values(&sig, "Answer: café ☕\nNote: naïve").unwrap();
        assert_eq!(values.get("answer").and_then(Value::as_str), Some("café ☕"));
        assert_eq!(values.get("note").and_then(Value::as_str), Some("naïve"));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let sig = signature("q -> answer, scores:number[]");
        let completion = "Answer: ok\nScores: [0.5, 1]";

        let first = extract_values(&sig, completion).unwrap();
        let second = extract_values(&sig, completion).unwrap();
        assert_eq!(first, second);
    }
}
