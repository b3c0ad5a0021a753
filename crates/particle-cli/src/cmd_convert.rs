/// Implementation of `particle convert`.
///
/// Decodes a document with one profile and re-encodes the same metadata
/// and content with another. Content bytes pass through untouched; a
/// document with no frontmatter is copied as-is.
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ConvertArgs;
use crate::profile;

/// Run the `particle convert` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, the target
/// codec cannot represent the metadata, or the output cannot be written.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let doc = profile::decode(args.from, &bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if doc.metadata.is_null() {
        tracing::warn!(file = %args.file.display(), "no {} frontmatter found, copying unchanged", args.from);
        return write_output(args.output.as_deref(), &bytes);
    }

    let out = profile::encode(args.to, &doc.metadata, &doc.content)?;
    tracing::debug!(from = %args.from, to = %args.to, bytes = out.len(), "converted frontmatter");
    write_output(args.output.as_deref(), &out)
}

/// Write `bytes` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
