//! Loading signatures and completions from the host environment.

use anyhow::{bail, Context, Result};
use signature_core::manifest::parse_manifest;
use signature_core::Signature;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Build a signature from an inline source or a manifest file
pub fn load_signature(
    source: Option<&str>,
    manifest: Option<&Path>,
    description: Option<&str>,
) -> Result<Signature> {
    match (source, manifest) {
        (Some(source), None) => {
            let signature = match description {
                Some(description) => Signature::with_description(source, description),
                None => Signature::new(source),
            };
            signature.context("Invalid signature")
        }
        (None, Some(path)) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;
            let manifest = parse_manifest(&content)
                .with_context(|| format!("Invalid manifest {}", path.display()))?;
            tracing::debug!(
                target: "signature",
                manifest = %path.display(),
                name = manifest.frontmatter.name.as_deref().unwrap_or("unnamed"),
                "manifest_loaded"
            );
            manifest
                .to_signature()
                .with_context(|| format!("Invalid signature in {}", path.display()))
        }
        (Some(_), Some(_)) => bail!("Use either --signature or --manifest, not both"),
        (None, None) => bail!("A signature is required: pass --signature or --manifest"),
    }
}

/// Read the completion text from a file, or stdin when the path is `-`
pub fn read_completion(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read completion from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read completion {}", path.display()))
}

/// Parse `--input name=value` pairs into a JSON object.
/// Values that parse as JSON are kept typed, anything else is a string.
pub fn parse_inputs(pairs: &[String]) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut inputs = serde_json::Map::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Invalid input '{}': expected name=value", pair);
        };
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        inputs.insert(name.trim().to_string(), value);
    }
    Ok(inputs)
}
