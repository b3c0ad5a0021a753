/// Implementation of `particle encode`.
///
/// Loads the metadata value from a JSON file, frames it in the selected
/// format and prefixes it onto the content file:
///
/// ```text
///   metadata.json ──┐
///                   ├──▶ ---\n<yaml>---\n\n<content>
///   content.md ─────┘
/// ```
use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::EncodeArgs;
use crate::cmd_convert::write_output;
use crate::profile;

/// Run the `particle encode` command.
///
/// # Errors
///
/// Returns an error if either input cannot be read, the metadata file is
/// not valid JSON, the codec cannot represent the value (TOML needs a
/// table at the top level), or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let raw = fs::read(&args.metadata)
        .with_context(|| format!("cannot read {}", args.metadata.display()))?;
    let metadata: Value = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not valid JSON", args.metadata.display()))?;
    let content = fs::read(&args.content)
        .with_context(|| format!("cannot read {}", args.content.display()))?;

    let doc = profile::encode(args.format, &metadata, &content)?;
    write_output(args.output.as_deref(), &doc)
}
