use std::sync::LazyLock;

use particle_wire::{
    DelimiterStyle, Delimiters, JSON_DELIMITER_PAIR, TOML_DELIMITER, YAML_DELIMITER,
};

use crate::cache::FrontmatterCache;
use crate::codec::{Codec, JsonCodec, TomlCodec, YamlCodec};
use crate::error::ConfigError;

/// Shared YAML profile (`---`, delimiters added by the encoder).
pub static YAML: LazyLock<Encoding<YamlCodec>> = LazyLock::new(Encoding::<YamlCodec>::yaml);

/// Shared TOML profile (`+++`, delimiters added by the encoder).
pub static TOML: LazyLock<Encoding<TomlCodec>> = LazyLock::new(Encoding::<TomlCodec>::toml);

/// Shared JSON profile (`{ }`, braces written by the codec itself).
pub static JSON: LazyLock<Encoding<JsonCodec>> = LazyLock::new(Encoding::<JsonCodec>::json);

/// One configuration step for [`EncodingBuilder::options`].
///
/// Options are applied in order; a later option overrides an earlier one
/// touching the same setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodingOption {
    /// Delimiter token (`"---"`, `"{ }"`, ...).
    Delimiter(String),
    /// How the token is split into start/end markers.
    Style(DelimiterStyle),
    /// Keep delimiter lines in the metadata segment and let the codec
    /// write them on encode.
    IncludeDelimiter,
}

/// Builder for [`Encoding`].
///
/// Defaults: `---` delimiter, [`DelimiterStyle::SingleToken`], delimiter
/// lines added by the encoder and stripped by the decoder.
///
/// ```rust
/// use particle_types::{Encoding, EncodingOption, JsonCodec};
/// use particle_wire::DelimiterStyle;
///
/// let json = Encoding::builder(JsonCodec)
///     .options([
///         EncodingOption::Delimiter("{ }".into()),
///         EncodingOption::Style(DelimiterStyle::SpaceSeparatedPair),
///         EncodingOption::IncludeDelimiter,
///     ])
///     .build()
///     .unwrap();
/// assert_eq!(json.delimiters().start(), "{");
/// ```
#[derive(Debug)]
#[must_use]
pub struct EncodingBuilder<C> {
    codec: C,
    delimiter: String,
    style: DelimiterStyle,
    emit_delimiters: bool,
}

impl<C: Codec> EncodingBuilder<C> {
    pub fn delimiter(mut self, token: impl Into<String>) -> Self {
        self.delimiter = token.into();
        self
    }

    pub fn style(mut self, style: DelimiterStyle) -> Self {
        self.style = style;
        self
    }

    pub fn include_delimiter(mut self) -> Self {
        self.emit_delimiters = true;
        self
    }

    pub fn option(self, option: EncodingOption) -> Self {
        match option {
            EncodingOption::Delimiter(token) => self.delimiter(token),
            EncodingOption::Style(style) => self.style(style),
            EncodingOption::IncludeDelimiter => self.include_delimiter(),
        }
    }

    pub fn options(self, options: impl IntoIterator<Item = EncodingOption>) -> Self {
        options.into_iter().fold(self, Self::option)
    }

    /// Derive the delimiters and freeze the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Delimiter`] when the token cannot be split
    /// according to the chosen style (for example a paired style with a
    /// token that is not exactly two space-separated parts).
    pub fn build(self) -> Result<Encoding<C>, ConfigError> {
        let delimiters = self.style.derive(&self.delimiter)?;
        Ok(Encoding {
            delimiters,
            style: self.style,
            emit_delimiters: self.emit_delimiters,
            codec: self.codec,
            cache: FrontmatterCache::new(),
        })
    }
}

/// An encoding profile: delimiters plus the codec for one metadata
/// format.
///
/// Build once and share. Everything except the serialization cache is
/// immutable after [`EncodingBuilder::build`], so a single profile can
/// serve any number of concurrent encode and decode calls.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Field            │ Purpose                                      │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ delimiters       │ start/end markers and their byte patterns    │
/// │ style            │ single token or space-separated pair         │
/// │ emit_delimiters  │ delimiter lines belong to the metadata text  │
/// │ codec            │ marshal / unmarshal                          │
/// │ cache            │ value digest → serialized frontmatter block  │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct Encoding<C> {
    delimiters: Delimiters,
    style: DelimiterStyle,
    emit_delimiters: bool,
    codec: C,
    cache: FrontmatterCache,
}

impl<C: Codec> Encoding<C> {
    pub fn builder(codec: C) -> EncodingBuilder<C> {
        EncodingBuilder {
            codec,
            delimiter: YAML_DELIMITER.to_string(),
            style: DelimiterStyle::SingleToken,
            emit_delimiters: false,
        }
    }

    #[must_use]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    #[must_use]
    pub fn style(&self) -> DelimiterStyle {
        self.style
    }

    /// `true` when delimiter lines are part of the metadata text rather
    /// than added and stripped by the core.
    #[must_use]
    pub fn emit_delimiters(&self) -> bool {
        self.emit_delimiters
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    #[must_use]
    pub fn cache(&self) -> &FrontmatterCache {
        &self.cache
    }
}

impl Encoding<YamlCodec> {
    #[must_use]
    pub fn yaml() -> Self {
        Self::builder(YamlCodec)
            .delimiter(YAML_DELIMITER)
            .build()
            .expect("YAML delimiter is a valid single token")
    }
}

impl Encoding<TomlCodec> {
    #[must_use]
    pub fn toml() -> Self {
        Self::builder(TomlCodec)
            .delimiter(TOML_DELIMITER)
            .build()
            .expect("TOML delimiter is a valid single token")
    }
}

impl Encoding<JsonCodec> {
    #[must_use]
    pub fn json() -> Self {
        Self::builder(JsonCodec)
            .delimiter(JSON_DELIMITER_PAIR)
            .style(DelimiterStyle::SpaceSeparatedPair)
            .include_delimiter()
            .build()
            .expect("JSON delimiter pair splits into two tokens")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_wire::WireError;

    #[test]
    fn presets_match_their_formats() {
        assert_eq!(YAML.delimiters().token(), "---");
        assert!(!YAML.emit_delimiters());
        assert_eq!(TOML.delimiters().token(), "+++");
        assert!(!TOML.emit_delimiters());
        assert_eq!(JSON.delimiters().start(), "{");
        assert_eq!(JSON.delimiters().end(), "}");
        assert_eq!(JSON.style(), DelimiterStyle::SpaceSeparatedPair);
        assert!(JSON.emit_delimiters());
    }

    #[test]
    fn custom_profile() {
        let enc = Encoding::builder(YamlCodec)
            .delimiter("xoxo")
            .include_delimiter()
            .build()
            .unwrap();
        assert_eq!(enc.delimiters().token(), "xoxo");
        assert!(enc.emit_delimiters());
        assert_eq!(enc.codec().name(), "yaml");
        assert!(enc.cache().is_empty());
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let enc = Encoding::builder(TomlCodec)
            .options([
                EncodingOption::Delimiter("~~~".into()),
                EncodingOption::Delimiter("+++".into()),
            ])
            .build()
            .unwrap();
        assert_eq!(enc.delimiters().token(), "+++");
    }

    #[test]
    fn malformed_pair_fails_at_build_time() {
        let err = Encoding::builder(JsonCodec)
            .delimiter("{}")
            .style(DelimiterStyle::SpaceSeparatedPair)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Delimiter(WireError::InvalidDelimiterPair { parts: 1, .. })
        ));
    }

    #[test]
    fn encoding_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encoding<YamlCodec>>();
        assert_send_sync::<Encoding<JsonCodec>>();
    }
}
