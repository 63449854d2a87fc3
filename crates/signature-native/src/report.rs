use signature_core::{ExtractionError, Signature};

/// Report a completion that did not conform to its signature
///
/// Event: ExtractionFailed
/// Printed to stderr with the offending field and raw span so the caller
/// can decide whether to re-prompt.
pub fn report_extraction_failure(signature: &Signature, err: &ExtractionError) -> ! {
    let field = err.field();
    let expected = field
        .field_type
        .map(|t| t.expected_shape())
        .unwrap_or_else(|| "text".to_string());

    let detail = match err {
        ExtractionError::Validation(e) => format!("  Raw value:  '{}'", e.raw_value),
        ExtractionError::MissingField(_) => format!("  Anchor not found: '{}'", field.prefix()),
    };

    let order = signature
        .output_fields()
        .iter()
        .map(|f| f.prefix())
        .collect::<Vec<_>>()
        .join(" -> ");

    let message = format!(
        r#"
❌ EXTRACTION FAILED: {}

  Field:      {} ({})
  Expected:   {}
{}

The completion must contain each output field once, in this order:
  {}
"#,
        err, field.name, field.title, expected, detail, order
    );

    tracing::debug!(target: "signature", field = %field.name, "extraction_failed");
    eprintln!("{}", message);
    std::process::exit(1);
}
