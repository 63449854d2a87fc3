//! Signature source grammar.
//!
//! The [`Signature`](crate::Signature) consumes any [`GrammarParser`]; the
//! default [`TextGrammar`] understands sources of the form
//!
//! ```text
//! question:string "what the user asked", context -> answer, scores:number[]
//! ```
//!
//! Inputs and outputs are separated by a single `->`, fields by commas. A
//! field is a name, an optional `:kind` with an optional `[]` array suffix,
//! and an optional double-quoted description.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::{RawField, RawFieldType};

/// Ordered raw field lists for both sides of a signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSignature {
    pub inputs: Vec<RawField>,
    pub outputs: Vec<RawField>,
}

/// Failure to parse a signature source
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the source
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Turns a signature source string into raw field lists.
pub trait GrammarParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<ParsedSignature, ParseError>;

    /// Optional name for debugging
    fn name(&self) -> &str {
        "unnamed_grammar"
    }
}

/// The default `inputs -> outputs` grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGrammar;

impl TextGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl GrammarParser for TextGrammar {
    fn parse(&self, source: &str) -> Result<ParsedSignature, ParseError> {
        let sides = split_unquoted(source, "->", 0)?;
        if sides.len() != 2 {
            return Err(ParseError::new(
                format!("expected exactly one '->', found {}", sides.len() - 1),
                0,
            ));
        }

        let (input_offset, input_src) = sides[0];
        let (output_offset, output_src) = sides[1];

        Ok(ParsedSignature {
            inputs: parse_field_list(input_src, input_offset, "input")?,
            outputs: parse_field_list(output_src, output_offset, "output")?,
        })
    }

    fn name(&self) -> &str {
        "text_grammar"
    }
}

/// Split `text` on `sep` wherever it occurs outside double quotes.
/// Returned slices carry their byte offset relative to the whole source.
fn split_unquoted<'a>(
    text: &'a str,
    sep: &str,
    base: usize,
) -> Result<Vec<(usize, &'a str)>, ParseError> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut quote_start = 0;
    let mut part_start = 0;
    let mut skip_until = 0;

    for (i, c) in text.char_indices() {
        if i < skip_until {
            continue;
        }
        if c == '"' {
            in_quote = !in_quote;
            quote_start = i;
        } else if !in_quote && text[i..].starts_with(sep) {
            parts.push((base + part_start, &text[part_start..i]));
            part_start = i + sep.len();
            skip_until = part_start;
        }
    }

    if in_quote {
        return Err(ParseError::new("unterminated description", base + quote_start));
    }

    parts.push((base + part_start, &text[part_start..]));
    Ok(parts)
}

fn parse_field_list(
    text: &str,
    offset: usize,
    side: &str,
) -> Result<Vec<RawField>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::new(format!("at least one {} field is required", side), offset));
    }

    split_unquoted(text, ",", offset)?
        .into_iter()
        .map(|(position, item)| parse_field(item, position))
        .collect()
}

fn parse_field(item: &str, position: usize) -> Result<RawField, ParseError> {
    let leading = item.len() - item.trim_start().len();
    let position = position + leading;
    let item = item.trim();

    if item.is_empty() {
        return Err(ParseError::new("empty field", position));
    }

    let (head, description) = match item.find('"') {
        Some(quote) => {
            let quoted = &item[quote..];
            if quoted.len() < 2 || !quoted.ends_with('"') {
                return Err(ParseError::new(
                    "description must be the last part of a field",
                    position + quote,
                ));
            }
            let inner = &quoted[1..quoted.len() - 1];
            (item[..quote].trim_end(), Some(inner.to_string()))
        }
        None => (item, None),
    };

    let (name, field_type) = match head.split_once(':') {
        Some((name, kind)) => (name.trim(), Some(parse_type(kind.trim(), position)?)),
        None => (head, None),
    };

    if !is_identifier(name) {
        return Err(ParseError::new(format!("invalid field name '{}'", name), position));
    }

    Ok(RawField {
        name: name.to_string(),
        title: None,
        description,
        field_type,
    })
}

fn parse_type(kind: &str, position: usize) -> Result<RawFieldType, ParseError> {
    let (name, is_array) = match kind.strip_suffix("[]") {
        Some(inner) => (inner.trim_end(), true),
        None => (kind, false),
    };

    if !is_identifier(name) {
        return Err(ParseError::new(format!("invalid field type '{}'", kind), position));
    }

    Ok(RawFieldType {
        name: name.to_string(),
        is_array,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
