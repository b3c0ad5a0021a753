use particle_types::{Codec, Encoding};
use particle_wire::Segmenter;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::config::SplitConfig;
use crate::error::DecodeError;
use crate::splitter::{self, SegmentReader, SplitStreams};

/// Splits documents produced with an [`Encoding`] back into metadata and
/// content.
///
/// Two families of entry points share the same framing rules:
///
/// ```text
/// ┌────────────────────┬────────┬──────────────────────────────────────┐
/// │ Method             │ Async  │ Returns                              │
/// ├────────────────────┼────────┼──────────────────────────────────────┤
/// │ decode_slice/_str  │ no     │ content bytes                        │
/// │ decoder            │ yes    │ content stream                       │
/// │ decode_stream      │ yes    │ content stream + unmarshal result    │
/// │ decode_reader      │ yes    │ content bytes                        │
/// │ split              │ yes    │ raw metadata and content streams     │
/// └────────────────────┴────────┴──────────────────────────────────────┘
/// ```
///
/// The async forms run one splitter task per call and must be used inside
/// a tokio runtime. The slice forms need no runtime.
///
/// # Example
///
/// ```rust
/// use particle_decoder::FrontmatterDecoder;
/// use particle_types::YAML;
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize)]
/// struct Meta {
///     name: String,
/// }
///
/// let mut meta = Meta::default();
/// let content = FrontmatterDecoder::new(&YAML)
///     .decode_str("---\nname: John Doe\n---\n\nHello.\n", &mut meta)
///     .unwrap();
/// assert_eq!(meta.name, "John Doe");
/// assert_eq!(content, b"Hello.\n");
/// ```
#[derive(Debug)]
pub struct FrontmatterDecoder<'e, C> {
    encoding: &'e Encoding<C>,
    config: SplitConfig,
    cancel: CancellationToken,
}

impl<'e, C: Codec> FrontmatterDecoder<'e, C> {
    #[must_use]
    pub fn new(encoding: &'e Encoding<C>) -> Self {
        Self {
            encoding,
            config: SplitConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SplitConfig) -> Self {
        self.config = config;
        self
    }

    /// Abort in-flight splits when `cancel` fires. Readers of a cancelled
    /// split fail with [`std::io::ErrorKind::Interrupted`].
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Start a split of `reader` and hand back both raw streams.
    pub fn split<R>(&self, reader: R) -> SplitStreams
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        splitter::split(
            reader,
            self.encoding.delimiters().clone(),
            self.encoding.emit_delimiters(),
            self.config,
            self.cancel.clone(),
        )
    }

    /// Drain the metadata of `reader` into `dest` and return the content
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Unmarshal`] with the codec's error when the
    /// metadata does not parse, [`DecodeError::Wire`] for an unterminated
    /// block and [`DecodeError::Io`] when reading the input fails while the
    /// metadata is being collected. Use
    /// [`decode_stream`](Self::decode_stream) to keep the content stream
    /// after an unmarshal failure.
    pub async fn decoder<R, T>(&self, reader: R, dest: &mut T) -> Result<SegmentReader, DecodeError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        T: DeserializeOwned,
    {
        let (content, result) = self.decode_stream(reader, dest).await;
        result.map(|()| content)
    }

    /// Like [`decoder`](Self::decoder), but always returns the content
    /// stream next to the metadata result.
    ///
    /// A metadata block the codec rejects does not affect the content: it
    /// is still readable in full.
    pub async fn decode_stream<R, T>(
        &self,
        reader: R,
        dest: &mut T,
    ) -> (SegmentReader, Result<(), DecodeError>)
    where
        R: AsyncRead + Send + Unpin + 'static,
        T: DeserializeOwned,
    {
        let (mut metadata, content) = self.split(reader).into_parts();
        let result = match metadata.read_all().await {
            Ok(raw) => self.unmarshal(&raw, dest),
            Err(err) => Err(err.into()),
        };
        (content, result)
    }

    /// Decode `reader` completely, returning the content bytes.
    ///
    /// # Errors
    ///
    /// As [`decoder`](Self::decoder), plus [`DecodeError::Io`] for input
    /// failures while reading the content.
    pub async fn decode_reader<R, T>(&self, reader: R, dest: &mut T) -> Result<Vec<u8>, DecodeError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        T: DeserializeOwned,
    {
        let mut content = self.decoder(reader, dest).await?;
        let mut body = Vec::new();
        content.read_to_end(&mut body).await?;
        Ok(body)
    }

    /// Decode an in-memory document without a background task.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Wire`] for an unterminated block and
    /// [`DecodeError::Unmarshal`] when the codec rejects the metadata.
    pub fn decode_slice<T: DeserializeOwned>(
        &self,
        src: &[u8],
        dest: &mut T,
    ) -> Result<Vec<u8>, DecodeError> {
        let segments = Segmenter::split_slice(
            self.encoding.delimiters().clone(),
            self.encoding.emit_delimiters(),
            src,
        )?;
        self.unmarshal(&segments.metadata, dest)?;
        Ok(segments.content)
    }

    /// String input form of [`decode_slice`](Self::decode_slice).
    ///
    /// # Errors
    ///
    /// See [`decode_slice`](Self::decode_slice).
    pub fn decode_str<T: DeserializeOwned>(
        &self,
        src: &str,
        dest: &mut T,
    ) -> Result<Vec<u8>, DecodeError> {
        self.decode_slice(src.as_bytes(), dest)
    }

    fn unmarshal<T: DeserializeOwned>(&self, raw: &[u8], dest: &mut T) -> Result<(), DecodeError> {
        tracing::debug!(
            codec = self.encoding.codec().name(),
            len = raw.len(),
            "unmarshalling frontmatter"
        );
        self.encoding.codec().unmarshal(raw, dest)?;
        Ok(())
    }
}
