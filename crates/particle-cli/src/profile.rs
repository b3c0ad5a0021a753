//! Format dispatch shared by the synchronous commands.
//!
//! Metadata is handled as a `serde_json::Value`, which every built-in
//! codec can both produce and consume, so the commands never need to know
//! the document's schema.

use anyhow::{Context, Result};
use particle_decoder::FrontmatterDecoder;
use particle_encoder::FrontmatterEncoder;
use particle_types::{Codec, Encoding, JSON, TOML, YAML};
use serde_json::Value;

use crate::Format;

/// A decoded document. `metadata` is `Null` when there was no frontmatter.
pub struct Document {
    pub metadata: Value,
    pub content: Vec<u8>,
}

pub fn decode(format: Format, bytes: &[u8]) -> Result<Document> {
    match format {
        Format::Yaml => decode_with(&YAML, bytes),
        Format::Toml => decode_with(&TOML, bytes),
        Format::Json => decode_with(&JSON, bytes),
    }
    .with_context(|| format!("cannot decode {format} frontmatter"))
}

pub fn encode(format: Format, metadata: &Value, content: &[u8]) -> Result<Vec<u8>> {
    match format {
        Format::Yaml => encode_with(&YAML, metadata, content),
        Format::Toml => encode_with(&TOML, metadata, content),
        Format::Json => encode_with(&JSON, metadata, content),
    }
    .with_context(|| format!("cannot encode {format} frontmatter"))
}

fn decode_with<C: Codec>(encoding: &Encoding<C>, bytes: &[u8]) -> Result<Document> {
    let mut metadata = Value::Null;
    let content = FrontmatterDecoder::new(encoding).decode_slice(bytes, &mut metadata)?;
    Ok(Document { metadata, content })
}

fn encode_with<C: Codec>(encoding: &Encoding<C>, metadata: &Value, content: &[u8]) -> Result<Vec<u8>> {
    Ok(FrontmatterEncoder::new(encoding).encode(content, metadata)?)
}
