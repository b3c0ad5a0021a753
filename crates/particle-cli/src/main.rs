/// Particle command-line tool: split, decode, encode, and convert
/// documents that carry a frontmatter block.
///
/// # Command overview
///
/// ```text
/// particle <COMMAND> [OPTIONS]
///
/// Commands:
///   split      Write the metadata and content of a document to separate files
///   decode     Print the metadata of a document as JSON
///   encode     Join a JSON metadata file and a content file into a document
///   convert    Re-encode a document's frontmatter in another format
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Debug logging on stderr (overrides RUST_LOG)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                       |
/// |------|-----------------------------------------------|
/// | 0    | Success                                       |
/// | 1    | Error (I/O failure, bad frontmatter, etc.)    |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cmd_convert;
mod cmd_decode;
mod cmd_encode;
mod cmd_split;
mod profile;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Split and join documents with YAML, TOML, or JSON frontmatter.
#[derive(Parser)]
#[command(name = "particle", version, about = "Frontmatter split/join CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Write the metadata and content of a document to separate outputs.
    Split(SplitArgs),
    /// Print the metadata of a document as JSON.
    Decode(DecodeArgs),
    /// Join a JSON metadata file and a content file into one document.
    Encode(EncodeArgs),
    /// Re-encode a document's frontmatter in another format.
    Convert(ConvertArgs),
}

/// Frontmatter format, selecting one of the built-in profiles.
///
/// ```text
/// ┌────────┬───────────┬──────────────────────────────────┐
/// │ Format │ Delimiter │ Metadata syntax                  │
/// ├────────┼───────────┼──────────────────────────────────┤
/// │ yaml   │ ---       │ YAML between delimiter lines     │
/// │ toml   │ +++       │ TOML between delimiter lines     │
/// │ json   │ { }       │ a tab-indented JSON object       │
/// └────────┴───────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        })
    }
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `particle split`.
///
/// Streams the document through the splitter. Without an output path the
/// corresponding segment is written to stdout (metadata first).
#[derive(clap::Args)]
pub struct SplitArgs {
    /// Document to split.
    pub file: PathBuf,

    /// Frontmatter format of the document.
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Write the raw metadata segment here.
    #[arg(long)]
    pub metadata_out: Option<PathBuf>,

    /// Write the content segment here.
    #[arg(long)]
    pub content_out: Option<PathBuf>,

    /// Input read size in bytes.
    #[arg(long, default_value_t = particle_decoder::config::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

/// Arguments for `particle decode`.
///
/// Parses the frontmatter with the chosen format and prints it as pretty
/// JSON. `--content` prints the content after the metadata.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Document to decode.
    pub file: PathBuf,

    /// Frontmatter format of the document.
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Also print the content.
    #[arg(long)]
    pub content: bool,
}

/// Arguments for `particle encode`.
///
/// ```text
/// ┌──────────────┬─────────────────────────────────────────────┐
/// │ Flag         │ Effect                                      │
/// ├──────────────┼─────────────────────────────────────────────┤
/// │ --metadata   │ JSON file holding the frontmatter value     │
/// │ --content    │ body file, copied verbatim                  │
/// │ --format     │ frontmatter format to write (default yaml)  │
/// │ -o/--output  │ write to file instead of stdout             │
/// └──────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// JSON file holding the metadata value.
    #[arg(long)]
    pub metadata: PathBuf,

    /// File holding the content body.
    #[arg(long)]
    pub content: PathBuf,

    /// Frontmatter format to write.
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `particle convert`.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Document to convert.
    pub file: PathBuf,

    /// Current frontmatter format.
    #[arg(long, value_enum)]
    pub from: Format,

    /// Frontmatter format to write.
    #[arg(long, value_enum)]
    pub to: Format,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Split(args) => cmd_split::run(&args).await,
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Convert(args) => cmd_convert::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` applies unless `--verbose` forces `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
