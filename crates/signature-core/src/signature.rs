//! The signature schema container.

use std::fmt;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::field::{FieldSpec, RawField};
use crate::parser::{GrammarParser, TextGrammar};

/// An ordered, named schema of input and output fields.
///
/// Built from a source string through a [`GrammarParser`]. Fields can be
/// appended afterwards; names and titles stay unique within each list
/// because titles are the anchors used to segment a completion.
pub struct Signature {
    description: Option<String>,
    source: String,
    input_fields: Vec<FieldSpec>,
    output_fields: Vec<FieldSpec>,
    parser: Arc<dyn GrammarParser>,
}

impl Signature {
    /// Build a signature from source using the default [`TextGrammar`]
    pub fn new(source: impl Into<String>) -> Result<Self, SchemaError> {
        Self::with_parser(source, None, Arc::new(TextGrammar::new()))
    }

    /// Build a signature with a task description using the default grammar
    pub fn with_description(
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        Self::with_parser(
            source,
            Some(description.into()),
            Arc::new(TextGrammar::new()),
        )
    }

    /// Build a signature with an explicit grammar parser.
    ///
    /// The parser is invoked exactly once; every field it yields is
    /// normalized before being stored.
    pub fn with_parser(
        source: impl Into<String>,
        description: Option<String>,
        parser: Arc<dyn GrammarParser>,
    ) -> Result<Self, SchemaError> {
        let source = source.into();
        if source.is_empty() {
            return Err(SchemaError::EmptySource);
        }

        let parsed = parser.parse(&source)?;
        let input_fields = field_list(&parsed.inputs)?;
        let output_fields = field_list(&parsed.outputs)?;

        tracing::debug!(
            target: "signature",
            grammar = parser.name(),
            inputs = input_fields.len(),
            outputs = output_fields.len(),
            "signature_built"
        );

        Ok(Self {
            description,
            source,
            input_fields,
            output_fields,
            parser,
        })
    }

    /// Normalize and append an input field.
    /// On error the field list is left unchanged.
    pub fn add_input_field(&mut self, field: RawField) -> Result<(), SchemaError> {
        push_unique(&mut self.input_fields, field.normalize()?)
    }

    /// Normalize and append an output field.
    /// On error the field list is left unchanged.
    pub fn add_output_field(&mut self, field: RawField) -> Result<(), SchemaError> {
        push_unique(&mut self.output_fields, field.normalize()?)
    }

    pub fn input_fields(&self) -> &[FieldSpec] {
        &self.input_fields
    }

    pub fn output_fields(&self) -> &[FieldSpec] {
        &self.output_fields
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The source string this signature was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Produce an independent copy.
    ///
    /// The source is re-parsed to build a baseline, then the baseline's
    /// field lists are replaced with copies of the current ones, so fields
    /// appended after construction survive the copy.
    pub fn try_clone(&self) -> Result<Self, SchemaError> {
        let mut copy = Self::with_parser(
            self.source.clone(),
            self.description.clone(),
            Arc::clone(&self.parser),
        )?;
        copy.input_fields = self.input_fields.clone();
        copy.output_fields = self.output_fields.clone();
        Ok(copy)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("description", &self.description)
            .field("source", &self.source)
            .field("input_fields", &self.input_fields)
            .field("output_fields", &self.output_fields)
            .field("parser", &self.parser.name())
            .finish()
    }
}

fn field_list(raw: &[RawField]) -> Result<Vec<FieldSpec>, SchemaError> {
    let mut fields = Vec::with_capacity(raw.len());
    for field in raw {
        push_unique(&mut fields, field.normalize()?)?;
    }
    Ok(fields)
}

fn push_unique(fields: &mut Vec<FieldSpec>, field: FieldSpec) -> Result<(), SchemaError> {
    if fields.iter().any(|f| f.name == field.name) {
        return Err(SchemaError::DuplicateName(field.name));
    }
    if fields.iter().any(|f| f.title == field.title) {
        return Err(SchemaError::DuplicateTitle {
            field: field.name,
            title: field.title,
        });
    }
    fields.push(field);
    Ok(())
}
