use std::io::Write;
use std::sync::Arc;

use particle_types::{Codec, CodecError, Encoding};
use particle_wire::Segmenter;
use serde::Serialize;

use crate::canonical::cache_key;
use crate::error::EncodeError;
use crate::writer::FrontmatterWriter;

/// Joins a serialized metadata block and a content body into one
/// document.
///
/// The encoder borrows an [`Encoding`] profile and is free to construct;
/// all state worth keeping lives in the profile's cache, so encoders can
/// be created per call or held across many.
///
/// # Usage
///
/// ```rust
/// use particle_encoder::FrontmatterEncoder;
/// use particle_types::YAML;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Meta {
///     name: &'static str,
/// }
///
/// let doc = FrontmatterEncoder::new(&YAML)
///     .encode_to_string("Content...", &Meta { name: "A NewEncoder Example" })
///     .unwrap();
/// assert_eq!(doc, "---\nname: A NewEncoder Example\n---\n\nContent...");
/// ```
///
/// # Output layout
///
/// When the core adds the delimiter lines (YAML, TOML):
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────┐
/// │ start + "\n"     │ opening delimiter line                    │
/// │ marshaled        │ codec output, newline-terminated          │
/// │ end + "\n"       │ closing delimiter line                    │
/// │ "\n"             │ separator blank line                      │
/// │ content          │ caller bytes, verbatim                    │
/// └──────────────────┴───────────────────────────────────────────┘
/// ```
///
/// When the codec writes its own delimiters (JSON), the block is just
/// `marshaled + "\n\n"` followed by the content.
#[derive(Debug)]
pub struct FrontmatterEncoder<'e, C> {
    encoding: &'e Encoding<C>,
}

impl<'e, C: Codec> FrontmatterEncoder<'e, C> {
    #[must_use]
    pub fn new(encoding: &'e Encoding<C>) -> Self {
        Self { encoding }
    }

    #[must_use]
    pub fn encoding(&self) -> &'e Encoding<C> {
        self.encoding
    }

    /// Serialize `value` into a complete frontmatter block, delimiters and
    /// separator included.
    ///
    /// Blocks are memoized in the profile's cache under a BLAKE3 digest of
    /// the value's canonical JSON rendering, so encoding an equal value a
    /// second time returns the stored bytes without calling the codec.
    /// Values that cannot be rendered as JSON, or that hold a NaN or
    /// infinite float, are marshalled on every call.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Marshal`] when the codec rejects the value,
    /// or [`EncodeError::Unframeable`] when the serialized block would not
    /// decode back as one frontmatter block (a JSON value that is not an
    /// object, a multi-line string holding a delimiter line). Nothing is
    /// cached in either case.
    pub fn frontmatter<T: Serialize + ?Sized>(&self, value: &T) -> Result<Arc<[u8]>, EncodeError> {
        let codec = self.encoding.codec().name();
        let Some(key) = cache_key(value) else {
            tracing::trace!(codec, "value has no canonical form, encoding uncached");
            return Ok(Arc::from(self.marshal_block(value)?));
        };

        if let Some(block) = self.encoding.cache().get(&key) {
            tracing::trace!(codec, len = block.len(), "frontmatter cache hit");
            return Ok(block);
        }

        let block = self.marshal_block(value)?;
        tracing::trace!(codec, len = block.len(), "frontmatter cache miss");
        Ok(self.encoding.cache().insert(key, block))
    }

    /// Frontmatter block for `value` followed by `content`.
    ///
    /// # Errors
    ///
    /// See [`frontmatter`](Self::frontmatter).
    pub fn encode<T: Serialize + ?Sized>(
        &self,
        content: &[u8],
        value: &T,
    ) -> Result<Vec<u8>, EncodeError> {
        let block = self.frontmatter(value)?;
        let mut out = Vec::with_capacity(block.len() + content.len());
        out.extend_from_slice(&block);
        out.extend_from_slice(content);
        Ok(out)
    }

    /// String form of [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// As [`frontmatter`](Self::frontmatter), plus
    /// [`EncodeError::Marshal`] when the block is not UTF-8.
    pub fn encode_to_string<T: Serialize + ?Sized>(
        &self,
        content: &str,
        value: &T,
    ) -> Result<String, EncodeError> {
        let block = self.frontmatter(value)?;
        let head = std::str::from_utf8(&block).map_err(CodecError::from)?;
        let mut out = String::with_capacity(head.len() + content.len());
        out.push_str(head);
        out.push_str(content);
        Ok(out)
    }

    /// Total document size for a body of `content_len` bytes.
    ///
    /// Goes through the cache, so a following `encode` of the same value
    /// does not marshal again.
    ///
    /// # Errors
    ///
    /// See [`frontmatter`](Self::frontmatter).
    pub fn encoded_len<T: Serialize + ?Sized>(
        &self,
        content_len: usize,
        value: &T,
    ) -> Result<usize, EncodeError> {
        Ok(self.frontmatter(value)?.len() + content_len)
    }

    /// Write the frontmatter block for `value` to `inner` now, and return
    /// a writer that passes every later write straight through as content.
    ///
    /// # Errors
    ///
    /// Returns the [`frontmatter`](Self::frontmatter) errors (nothing is
    /// written) or [`EncodeError::Io`] if writing the block fails.
    pub fn writer<W: Write, T: Serialize + ?Sized>(
        &self,
        mut inner: W,
        value: &T,
    ) -> Result<FrontmatterWriter<W>, EncodeError> {
        let block = self.frontmatter(value)?;
        inner.write_all(&block)?;
        Ok(FrontmatterWriter::new(inner, block.len()))
    }

    // ── Framing ─────────────────────────────────────────────────────────

    fn marshal_block<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let marshaled = self.encoding.codec().marshal(value)?;
        let block = self.frame(marshaled);
        self.check_framing(&block)?;
        Ok(block)
    }

    fn frame(&self, mut marshaled: Vec<u8>) -> Vec<u8> {
        if self.encoding.emit_delimiters() {
            marshaled.extend_from_slice(b"\n\n");
            return marshaled;
        }

        let delimiters = self.encoding.delimiters();
        let start = delimiters.start().as_bytes();
        let end = delimiters.end().as_bytes();
        let mut block = Vec::with_capacity(start.len() + marshaled.len() + end.len() + 4);
        block.extend_from_slice(start);
        block.push(b'\n');
        block.extend_from_slice(&marshaled);
        if !marshaled.is_empty() && !marshaled.ends_with(b"\n") {
            block.push(b'\n');
        }
        block.extend_from_slice(end);
        block.extend_from_slice(b"\n\n");
        block
    }

    /// Scan `block` the way a decoder would. It must open at offset 0 and
    /// close exactly at its own end, leaving no content behind.
    fn check_framing(&self, block: &[u8]) -> Result<(), EncodeError> {
        let delimiters = self.encoding.delimiters();
        let clean =
            Segmenter::split_slice(delimiters.clone(), self.encoding.emit_delimiters(), block)
                .is_ok_and(|segments| segments.metadata_closed && segments.content.is_empty());
        if clean {
            return Ok(());
        }
        tracing::debug!(
            codec = self.encoding.codec().name(),
            delimiter = delimiters.token(),
            len = block.len(),
            "serialized frontmatter does not frame cleanly"
        );
        Err(EncodeError::Unframeable {
            delimiter: delimiters.token().to_string(),
        })
    }
}
