#![warn(clippy::pedantic)]

mod canonical;
pub mod encoder;
pub mod error;
pub mod writer;

pub use encoder::FrontmatterEncoder;
pub use error::EncodeError;
pub use writer::FrontmatterWriter;
