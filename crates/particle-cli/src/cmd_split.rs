/// Implementation of `particle split`.
///
/// Streams the input file through the splitter task, so neither segment
/// is ever held in memory whole. Each segment goes to its `--*-out` file,
/// or to stdout when none is given (metadata first, then content).
///
/// The raw metadata segment is written exactly as it appears between the
/// delimiter lines; nothing is parsed.
use std::path::Path;

use anyhow::{Context, Result};
use particle_decoder::{DecodeError, FrontmatterDecoder, SegmentReader, SplitConfig, SplitStreams};
use particle_types::{JSON, TOML, YAML};
use tokio::fs::File;
use tokio::io::{self, AsyncWriteExt as _};

use crate::{Format, SplitArgs};

/// Run the `particle split` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or read, the
/// frontmatter block is never closed, or an output cannot be written.
pub async fn run(args: &SplitArgs) -> Result<()> {
    let file = File::open(&args.file)
        .await
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    let config = SplitConfig::default().with_chunk_size(args.chunk_size);

    let streams: SplitStreams = match args.format {
        Format::Yaml => FrontmatterDecoder::new(&YAML).with_config(config).split(file),
        Format::Toml => FrontmatterDecoder::new(&TOML).with_config(config).split(file),
        Format::Json => FrontmatterDecoder::new(&JSON).with_config(config).split(file),
    };
    let (mut metadata, mut content) = streams.into_parts();

    copy_segment(&mut metadata, args.metadata_out.as_deref(), "metadata")
        .await
        .with_context(|| format!("failed to split {}", args.file.display()))?;
    copy_segment(&mut content, args.content_out.as_deref(), "content")
        .await
        .with_context(|| format!("failed to split {}", args.file.display()))?;
    Ok(())
}

async fn copy_segment(reader: &mut SegmentReader, out: Option<&Path>, segment: &str) -> Result<()> {
    let copied = match out {
        Some(path) => {
            let mut file = File::create(path)
                .await
                .with_context(|| format!("cannot create {}", path.display()))?;
            let n = io::copy(reader, &mut file).await.map_err(DecodeError::from)?;
            file.flush().await?;
            n
        }
        None => {
            let mut stdout = io::stdout();
            let n = io::copy(reader, &mut stdout).await.map_err(DecodeError::from)?;
            stdout.flush().await?;
            n
        }
    };
    tracing::debug!(segment, bytes = copied, "segment written");
    Ok(())
}
