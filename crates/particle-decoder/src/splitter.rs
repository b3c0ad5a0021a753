use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use particle_wire::{Delimiters, Segmenter, Segments, WireError};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::SplitConfig;

/// The two halves of one split.
///
/// Each reader is independent and can be consumed (or dropped) on its
/// own. Metadata always ends before any content is produced, so draining
/// `metadata` first and `content` second never stalls.
#[derive(Debug)]
pub struct SplitStreams {
    pub metadata: SegmentReader,
    pub content: SegmentReader,
}

impl SplitStreams {
    #[must_use]
    pub fn into_parts(self) -> (SegmentReader, SegmentReader) {
        (self.metadata, self.content)
    }
}

/// Start splitting `reader` on a background task.
///
/// One tokio task reads the input in `config.chunk_size` pieces, runs them
/// through a [`Segmenter`], and forwards the routed bytes into two bounded
/// channels:
///
/// ```text
///                  ┌──────────────┐   metadata  ┌───────────────┐
///   AsyncRead ───▶ │ splitter     │ ──────────▶ │ SegmentReader │
///   (chunks)       │ task         │   content   ├───────────────┤
///                  │ (Segmenter)  │ ──────────▶ │ SegmentReader │
///                  └──────────────┘             └───────────────┘
/// ```
///
/// The metadata channel is closed as soon as the block ends (or the input
/// turns out to have none); the content channel closes at end of input.
/// A reader that is dropped early stops receiving and the task discards
/// that stream's bytes instead of blocking on it.
///
/// Failures (input read errors, an unterminated block, timeouts,
/// cancellation) are recorded for every stream that is still open before
/// its channel closes, so those readers report the error in place of a
/// clean end of stream.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn split<R>(
    reader: R,
    delimiters: Delimiters,
    emit_delimiters: bool,
    config: SplitConfig,
    cancel: CancellationToken,
) -> SplitStreams
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let capacity = config.channel_capacity.max(1);
    let (metadata_tx, metadata_rx) = mpsc::channel(capacity);
    let (content_tx, content_rx) = mpsc::channel(capacity);
    let metadata_failure = FailureSlot::default();
    let content_failure = FailureSlot::default();

    let producer = Producer {
        segmenter: Segmenter::new(delimiters, emit_delimiters),
        config,
        cancel,
        metadata: Sink {
            stream: "metadata",
            tx: Some(metadata_tx),
            failure: Arc::clone(&metadata_failure),
        },
        content: Sink {
            stream: "content",
            tx: Some(content_tx),
            failure: Arc::clone(&content_failure),
        },
    };
    tokio::spawn(producer.run(reader));

    SplitStreams {
        metadata: SegmentReader::new(metadata_rx, metadata_failure),
        content: SegmentReader::new(content_rx, content_failure),
    }
}

// ── Failure reporting ───────────────────────────────────────────────────

/// Why a stream ended early.
#[derive(Clone, Debug)]
enum Failure {
    Wire(WireError),
    Io { kind: io::ErrorKind, message: String },
}

impl Failure {
    fn cancelled() -> Self {
        Self::Io {
            kind: io::ErrorKind::Interrupted,
            message: "frontmatter split cancelled".to_string(),
        }
    }

    fn timed_out(what: &str, limit: Duration) -> Self {
        Self::Io {
            kind: io::ErrorKind::TimedOut,
            message: format!("{what} timed out after {limit:?}"),
        }
    }

    fn to_io_error(&self) -> io::Error {
        match self {
            Self::Wire(err) => io::Error::new(io::ErrorKind::InvalidData, err.clone()),
            Self::Io { kind, message } => io::Error::new(*kind, message.clone()),
        }
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<WireError> for Failure {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}

type FailureSlot = Arc<Mutex<Option<Failure>>>;

// ── Reader side ─────────────────────────────────────────────────────────

/// One output stream of a split, readable with [`AsyncRead`].
///
/// Yields the stream's bytes in input order, then either a clean end of
/// stream or, if the split failed while this stream was still open, the
/// failure as an [`io::Error`]. The error repeats on every later read.
/// Framing errors are wrapped with kind `InvalidData` and carry the
/// [`WireError`] as their inner error.
#[derive(Debug)]
pub struct SegmentReader {
    rx: mpsc::Receiver<Bytes>,
    pending: Bytes,
    failure: FailureSlot,
    done: bool,
}

impl SegmentReader {
    fn new(rx: mpsc::Receiver<Bytes>, failure: FailureSlot) -> Self {
        Self {
            rx,
            pending: Bytes::new(),
            failure,
            done: false,
        }
    }

    /// Read the rest of the stream into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns the split failure recorded for this stream, if any.
    pub async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.read_to_end(&mut out).await?;
        Ok(out)
    }

    fn finish(&self) -> io::Result<()> {
        match &*self.failure.lock().expect("segment failure lock poisoned") {
            Some(failure) => Err(failure.to_io_error()),
            None => Ok(()),
        }
    }
}

impl AsyncRead for SegmentReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        loop {
            if !this.pending.is_empty() {
                let n = this.pending.len().min(buf.remaining());
                buf.put_slice(&this.pending.split_to(n));
                return Poll::Ready(Ok(()));
            }
            if this.done {
                return Poll::Ready(this.finish());
            }
            match this.rx.poll_recv(cx) {
                Poll::Ready(Some(chunk)) => this.pending = chunk,
                Poll::Ready(None) => {
                    this.done = true;
                    return Poll::Ready(this.finish());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

// ── Producer side ───────────────────────────────────────────────────────

/// Sending half of one output stream, owned by the splitter task.
struct Sink {
    stream: &'static str,
    tx: Option<mpsc::Sender<Bytes>>,
    failure: FailureSlot,
}

impl Sink {
    fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// Forward `bytes` to the reader, waiting for channel space.
    ///
    /// A reader that has gone away closes the sink; its bytes are dropped
    /// from then on.
    async fn send(
        &mut self,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
        limit: Option<Duration>,
    ) -> Result<(), Failure> {
        if bytes.is_empty() {
            return Ok(());
        }
        let Some(tx) = self.tx.as_ref() else {
            return Ok(());
        };

        let chunk = Bytes::from(bytes);
        let send = async {
            match limit {
                Some(limit) => timeout(limit, tx.send(chunk))
                    .await
                    .map_err(|_| Failure::timed_out("segment write", limit)),
                None => Ok(tx.send(chunk).await),
            }
        };
        let sent = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Failure::cancelled()),
            sent = send => sent?,
        };

        if sent.is_err() {
            tracing::debug!(stream = self.stream, "segment reader dropped, discarding its bytes");
            self.tx = None;
        }
        Ok(())
    }

    /// Close the channel normally. Returns `false` if it was already closed.
    fn close(&mut self) -> bool {
        self.tx.take().is_some()
    }

    /// Record `failure` for the reader, then close the channel.
    fn fail(&mut self, failure: &Failure) {
        if self.tx.is_some() {
            *self.failure.lock().expect("segment failure lock poisoned") = Some(failure.clone());
            self.tx = None;
        }
    }
}

struct Producer {
    segmenter: Segmenter,
    config: SplitConfig,
    cancel: CancellationToken,
    metadata: Sink,
    content: Sink,
}

impl Producer {
    async fn run<R: AsyncRead + Unpin>(mut self, mut reader: R) {
        match self.pump(&mut reader).await {
            Ok(consumed) => tracing::debug!(bytes = consumed, "frontmatter split complete"),
            Err(failure) => {
                tracing::warn!(?failure, "frontmatter split failed");
                self.metadata.fail(&failure);
                self.content.fail(&failure);
            }
        }
    }

    /// Drive the segmenter until end of input. Returns bytes consumed.
    async fn pump<R: AsyncRead + Unpin>(&mut self, reader: &mut R) -> Result<usize, Failure> {
        let mut chunk = vec![0u8; self.config.chunk_size.max(1)];
        let mut pending: Vec<u8> = Vec::new();
        let mut out = Segments::default();

        loop {
            if !self.metadata.is_open() && !self.content.is_open() {
                tracing::debug!("segment readers dropped, stopping split early");
                return Ok(self.segmenter.scanner().offset());
            }

            let n = read_chunk(reader, &mut chunk, &self.cancel, self.config.read_timeout).await?;
            pending.extend_from_slice(&chunk[..n]);

            let progress = self.segmenter.feed(&pending, n == 0, &mut out)?;
            pending.drain(..progress.consumed);
            self.flush(&mut out).await?;

            if progress.finished {
                return Ok(self.segmenter.scanner().offset());
            }
        }
    }

    async fn flush(&mut self, out: &mut Segments) -> Result<(), Failure> {
        let limit = self.config.write_timeout;
        self.metadata
            .send(out.take_metadata(), &self.cancel, limit)
            .await?;
        if out.metadata_closed && self.metadata.close() {
            tracing::debug!(
                offset = self.segmenter.scanner().offset(),
                "metadata segment closed"
            );
        }
        self.content
            .send(out.take_content(), &self.cancel, limit)
            .await
    }
}

/// One input read, bounded by `limit` and abandoned on cancellation.
async fn read_chunk<R: AsyncRead + Unpin>(
    reader: &mut R,
    chunk: &mut [u8],
    cancel: &CancellationToken,
    limit: Option<Duration>,
) -> Result<usize, Failure> {
    let read = async {
        match limit {
            Some(limit) => match timeout(limit, reader.read(chunk)).await {
                Ok(result) => result.map_err(Failure::from),
                Err(_) => Err(Failure::timed_out("input read", limit)),
            },
            None => reader.read(chunk).await.map_err(Failure::from),
        }
    };
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Failure::cancelled()),
        result = read => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    fn yaml() -> Delimiters {
        Delimiters::single("---").unwrap()
    }

    fn start(input: &'static [u8], config: SplitConfig) -> SplitStreams {
        split(input, yaml(), false, config, CancellationToken::new())
    }

    /// Yields `data` once, then fails.
    struct FailingReader {
        data: &'static [u8],
        served: bool,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.served {
                return Poll::Ready(Err(io::Error::other("disk on fire")));
            }
            self.served = true;
            buf.put_slice(self.data);
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn splits_into_two_streams() {
        let doc = b"---\nname: John Doe\n---\n\nThis is an example file.\n";
        let SplitStreams {
            mut metadata,
            mut content,
        } = start(doc, SplitConfig::default());

        assert_eq!(metadata.read_all().await.unwrap(), b"name: John Doe");
        assert_eq!(content.read_all().await.unwrap(), b"This is an example file.\n");
    }

    #[tokio::test]
    async fn tiny_chunks_and_channels_give_the_same_split() {
        let doc = b"---\ntitle: chunked\ntags: [a, b]\n---\n\nline one\n---\nline two\n";
        let config = SplitConfig::default()
            .with_chunk_size(1)
            .with_channel_capacity(1);
        let (mut metadata, mut content) = start(doc, config).into_parts();

        assert_eq!(
            metadata.read_all().await.unwrap(),
            b"title: chunked\ntags: [a, b]"
        );
        assert_eq!(content.read_all().await.unwrap(), b"line one\n---\nline two\n");
    }

    #[tokio::test]
    async fn no_frontmatter_closes_metadata_immediately() {
        let doc = b"plain text\n---\n";
        let (mut metadata, mut content) = start(doc, SplitConfig::default()).into_parts();
        assert!(metadata.read_all().await.unwrap().is_empty());
        assert_eq!(content.read_all().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn draining_only_content_completes() {
        let mut doc = b"---\n".to_vec();
        for i in 0..500 {
            doc.extend_from_slice(format!("key{i}: value\n").as_bytes());
        }
        doc.extend_from_slice(b"---\n\nbody");
        let doc: &'static [u8] = doc.leak();

        let config = SplitConfig::default()
            .with_chunk_size(4)
            .with_channel_capacity(1);
        let (metadata, mut content) = start(doc, config).into_parts();
        drop(metadata);

        let body = tokio::time::timeout(Duration::from_secs(5), content.read_all())
            .await
            .expect("content drain stalled")
            .unwrap();
        assert_eq!(body, b"body");
    }

    #[tokio::test]
    async fn unterminated_block_is_reported_to_readers() {
        let (mut metadata, mut content) =
            start(b"---\nkey: value\n", SplitConfig::default()).into_parts();

        let err = metadata.read_all().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<WireError>());
        assert_eq!(inner, Some(&WireError::UnterminatedBlock { offset: 15 }));

        assert!(content.read_all().await.is_err());
    }

    #[tokio::test]
    async fn read_error_reaches_the_open_stream_only() {
        let reader = FailingReader {
            data: b"---\na: 1\n---\n\npartial body",
            served: false,
        };
        let streams = split(reader, yaml(), false, SplitConfig::default(), CancellationToken::new());
        let (mut metadata, mut content) = streams.into_parts();

        assert_eq!(metadata.read_all().await.unwrap(), b"a: 1");

        let mut body = Vec::new();
        let err = content.read_to_end(&mut body).await.unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(body, b"partial body");
    }

    #[tokio::test]
    async fn errors_repeat_after_the_first_report() {
        let (mut metadata, _content) = start(b"---\nopen", SplitConfig::default()).into_parts();
        assert!(metadata.read_all().await.is_err());
        assert!(metadata.read_all().await.is_err());
    }

    #[tokio::test]
    async fn cancellation_stops_a_stalled_split() {
        let (_writer, input) = tokio::io::duplex(64);
        let cancel = CancellationToken::new();
        let (mut metadata, mut content) =
            split(input, yaml(), false, SplitConfig::default(), cancel.clone()).into_parts();

        cancel.cancel();
        let err = metadata.read_all().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        assert_eq!(
            content.read_all().await.unwrap_err().kind(),
            io::ErrorKind::Interrupted
        );
    }

    #[tokio::test]
    async fn read_timeout_fails_the_split() {
        let (mut writer, input) = tokio::io::duplex(64);
        writer.write_all(b"---\nhalf: a block").await.unwrap();

        let config = SplitConfig::default().with_read_timeout(Duration::from_millis(20));
        let (mut metadata, _content) =
            split(input, yaml(), false, config, CancellationToken::new()).into_parts();

        let err = metadata.read_all().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn write_timeout_fails_a_stalled_reader() {
        let body: &'static [u8] = b"0123456789".repeat(64).leak();
        let mut doc = b"---\na: 1\n---\n\n".to_vec();
        doc.extend_from_slice(body);
        let doc: &'static [u8] = doc.leak();

        let config = SplitConfig::default()
            .with_chunk_size(8)
            .with_channel_capacity(1)
            .with_write_timeout(Duration::from_millis(20));
        let (mut metadata, mut content) = start(doc, config).into_parts();
        assert_eq!(metadata.read_all().await.unwrap(), b"a: 1");

        tokio::time::sleep(Duration::from_millis(200)).await;
        let err = content.read_all().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn emitted_delimiters_stay_in_metadata() {
        let doc: &'static [u8] = b"{\n\t\"Name\": \"A Example\"\n}\n\nContent...";
        let delims = Delimiters::pair("{ }").unwrap();
        let (mut metadata, mut content) =
            split(doc, delims, true, SplitConfig::default(), CancellationToken::new())
                .into_parts();

        assert_eq!(
            metadata.read_all().await.unwrap(),
            b"{\n\t\"Name\": \"A Example\"\n}\n"
        );
        assert_eq!(content.read_all().await.unwrap(), b"Content...");
    }
}
