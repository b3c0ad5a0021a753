#![warn(clippy::pedantic)]

pub mod cache;
pub mod codec;
pub mod error;
pub mod profile;

pub use cache::{CacheKey, FrontmatterCache};
pub use codec::{Codec, JsonCodec, TomlCodec, YamlCodec};
pub use error::{CodecError, ConfigError};
pub use profile::{Encoding, EncodingBuilder, EncodingOption, JSON, TOML, YAML};
