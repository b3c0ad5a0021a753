#![warn(clippy::pedantic)]

pub mod delimiter;
pub mod error;
pub mod scanner;
pub mod segment;

pub use delimiter::{
    DelimiterStyle, Delimiters, JSON_DELIMITER_PAIR, TOML_DELIMITER, YAML_DELIMITER,
};
pub use error::WireError;
pub use scanner::{ScanState, Scanner, Step, Token};
pub use segment::{Progress, Segmenter, Segments};
