use particle_wire::WireError;

/// Errors from the structured-format codecs.
///
/// The core never inspects these; they are handed back to the caller
/// of encode/decode as-is. Each built-in codec maps onto one variant so
/// callers can still match on the underlying library error.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────┐
/// │ Variant  │ Source                                       │
/// ├──────────┼──────────────────────────────────────────────┤
/// │ Yaml     │ serde_yaml (both directions)                 │
/// │ TomlDe   │ toml::from_str                               │
/// │ TomlSer  │ toml::to_string                              │
/// │ Json     │ serde_json (both directions)                 │
/// │ Utf8     │ metadata bytes are not UTF-8 (TOML only)     │
/// │ Custom   │ any user-provided codec                      │
/// └──────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl CodecError {
    /// Wrap an error from a user-provided codec.
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Custom(err.into())
    }
}

/// Errors raised while building an [`Encoding`](crate::Encoding).
///
/// These are programming errors in the profile definition. They are
/// reported by `EncodingBuilder::build` and can never surface from an
/// encode or decode call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Delimiter(#[from] WireError),
}
