//! Error types shared across the crate.

use thiserror::Error;

use crate::field::FieldSpec;
use crate::parser::ParseError;

/// Errors raised while building a signature or appending fields to it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("Signature is required")]
    EmptySource,

    #[error("Field name is required")]
    MissingFieldName,

    #[error("Field type name is required: {0}")]
    MissingTypeName(String),

    #[error("Unknown field type '{kind}' for field: {field}")]
    UnknownTypeName { field: String, kind: String },

    #[error("Duplicate field name: {0}")]
    DuplicateName(String),

    #[error("Duplicate field title '{title}' for field: {field}")]
    DuplicateTitle { field: String, title: String },

    #[error("failed to parse signature: {0}")]
    Parse(#[from] ParseError),
}

/// A completion span that does not conform to its field's declared type.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    /// The field whose value failed validation
    pub field: FieldSpec,
    /// The trimmed span as it appeared in the completion
    pub raw_value: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, field: &FieldSpec, raw_value: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.clone(),
            raw_value: raw_value.into(),
        }
    }
}

/// Errors raised while extracting values from a completion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The field's `Title:` anchor does not appear where it was expected
    #[error("Missing field '{}' in completion (expected '{}:')", .0.name, .0.title)]
    MissingField(FieldSpec),
}

impl ExtractionError {
    /// The field the error refers to.
    pub fn field(&self) -> &FieldSpec {
        match self {
            Self::Validation(err) => &err.field,
            Self::MissingField(field) => field,
        }
    }
}
