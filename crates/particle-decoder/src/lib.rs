#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod splitter;

pub use config::SplitConfig;
pub use decoder::FrontmatterDecoder;
pub use error::DecodeError;
pub use splitter::{SegmentReader, SplitStreams, split};
pub use tokio_util::sync::CancellationToken;
