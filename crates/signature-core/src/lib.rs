//! # signature-core
//!
//! Structured-output extraction for prompt/response signatures, with no
//! dependencies on OS, FFI, or specific LLM implementations.
//!
//! This crate provides:
//! - A [`Signature`] schema of named, optionally typed input and output fields
//! - Segmentation of a raw model completion into per-field spans
//! - Coercion of each span into its declared type, failing precisely when
//!   the completion does not conform
//!
//! This crate compiles to `wasm32-unknown-unknown` without any feature flags.

#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod field;
pub mod manifest;
pub mod parser;
pub mod prompt;
pub mod signature;
pub mod title;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use error::{ExtractionError, SchemaError, ValidationError};
pub use extract::{extract_values, segment, Span};
pub use field::{FieldSpec, FieldType, RawField, RawFieldType, ScalarKind};
pub use parser::{GrammarParser, ParseError, ParsedSignature, TextGrammar};
pub use prompt::{output_format, render_prompt, PromptError};
pub use signature::Signature;
pub use title::to_title;
pub use value::{ExtractedValues, Value};
