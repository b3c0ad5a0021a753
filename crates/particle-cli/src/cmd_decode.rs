/// Implementation of `particle decode`.
///
/// Reads the whole document, parses its frontmatter with the selected
/// format and prints the metadata as pretty JSON on stdout. A document
/// without frontmatter prints `null`.
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result};

use crate::DecodeArgs;
use crate::profile;

/// Run the `particle decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the frontmatter is
/// malformed or rejected by the codec, or stdout cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let doc = profile::decode(args.format, &bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &doc.metadata)?;
    writeln!(stdout)?;
    if args.content {
        writeln!(stdout)?;
        stdout.write_all(&doc.content)?;
    }
    stdout.flush()?;
    Ok(())
}
