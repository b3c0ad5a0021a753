use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::error::CodecError;

/// A structured-format marshal/unmarshal pair.
///
/// The splitting core only ever hands a codec complete byte buffers: the
/// drained metadata segment on decode, the value to serialize on encode.
/// Nothing about the format leaks into scanning.
///
/// # Contract
///
/// - `marshal` returns the serialized document. For encodings that let
///   the core add delimiter lines it should end with a newline.
/// - `unmarshal` overwrites `dest` on success. When `bytes` is blank
///   (no frontmatter, or an empty block) the built-in codecs leave `dest`
///   untouched and return `Ok(())`.
///
/// Implementations must be `Send + Sync`: one [`Encoding`](crate::Encoding)
/// is shared by every concurrent encode and decode call.
pub trait Codec: Send + Sync {
    /// Short lowercase format name, used in log output.
    fn name(&self) -> &'static str;

    /// Serialize `value` into the format's text.
    ///
    /// # Errors
    ///
    /// Returns the underlying serializer's error.
    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Deserialize `bytes` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserializer's error; `dest` is unchanged
    /// in that case.
    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8], dest: &mut T) -> Result<(), CodecError>;
}

/// `true` when the metadata segment holds nothing but whitespace.
fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// YAML via `serde_yaml`. Used with `---` delimiters.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8], dest: &mut T) -> Result<(), CodecError> {
        if is_blank(bytes) {
            return Ok(());
        }
        *dest = serde_yaml::from_slice(bytes)?;
        Ok(())
    }
}

/// TOML via the `toml` crate. Used with `+++` delimiters.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(toml::to_string(value)?.into_bytes())
    }

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8], dest: &mut T) -> Result<(), CodecError> {
        if is_blank(bytes) {
            return Ok(());
        }
        let text = std::str::from_utf8(bytes)?;
        *dest = toml::from_str(text)?;
        Ok(())
    }
}

/// JSON via `serde_json`, tab-indented.
///
/// The object's own braces double as the `{ }` delimiter pair, so the
/// output of `marshal` is already a complete frontmatter block.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        // An empty object needs its braces on separate lines to be framed.
        if buf == b"{}" {
            buf = b"{\n}".to_vec();
        }
        Ok(buf)
    }

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8], dest: &mut T) -> Result<(), CodecError> {
        if is_blank(bytes) {
            return Ok(());
        }
        *dest = serde_json::from_slice(bytes)?;
        Ok(())
    }
}
