//! Signature manifests.
//!
//! A manifest is a Markdown file whose YAML frontmatter names a signature
//! source and an optional description. The body is kept raw so hosts can
//! show it as documentation.
//!
//! ```text
//! ---
//! name: qa
//! signature: question -> answer, confidence:number
//! description: Answer the question in one sentence.
//! ---
//! Notes for humans.
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::signature::Signature;

/// Parsed frontmatter of a signature manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignatureFrontmatter {
    pub signature: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full manifest with body content
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureManifest {
    pub frontmatter: SignatureFrontmatter,
    pub body: String,
}

impl SignatureManifest {
    /// Build the signature this manifest describes
    pub fn to_signature(&self) -> Result<Signature, SchemaError> {
        match &self.frontmatter.description {
            Some(description) => {
                Signature::with_description(self.frontmatter.signature.clone(), description.clone())
            }
            None => Signature::new(self.frontmatter.signature.clone()),
        }
    }
}

/// Errors while parsing a manifest
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ManifestError {
    #[error("missing frontmatter delimiter '---'")]
    MissingDelimiter,
    #[error("frontmatter not found")]
    MissingFrontmatter,
    #[error("failed to parse frontmatter: {0}")]
    FrontmatterParse(String),
}

/// Parse a manifest string into frontmatter and body.
/// Expects YAML frontmatter delimited by `---` at the start of the file.
pub fn parse_manifest(markdown: &str) -> Result<SignatureManifest, ManifestError> {
    let mut lines = markdown.lines();
    let first = lines.next().ok_or(ManifestError::MissingFrontmatter)?;

    if first.trim() != "---" {
        return Err(ManifestError::MissingDelimiter);
    }

    let mut frontmatter_raw = String::new();
    let mut closed = false;

    for line in lines.by_ref() {
        if line.trim() == "---" {
            closed = true;
            break;
        }
        frontmatter_raw.push_str(line);
        frontmatter_raw.push('\n');
    }

    if !closed {
        return Err(ManifestError::MissingFrontmatter);
    }

    let frontmatter: SignatureFrontmatter = serde_yaml::from_str(&frontmatter_raw)
        .map_err(|e| ManifestError::FrontmatterParse(e.to_string()))?;

    let body = lines.collect::<Vec<_>>().join("\n");

    Ok(SignatureManifest { frontmatter, body })
}
