use std::mem;

use crate::delimiter::Delimiters;
use crate::error::WireError;
use crate::scanner::{ScanState, Scanner, Step, Token};

/// Bytes routed by one or more [`Segmenter::feed`] calls.
///
/// Callers drain `metadata` and `content` between feeds (see
/// [`take_metadata`](Self::take_metadata) /
/// [`take_content`](Self::take_content)). `metadata_closed` is sticky:
/// once set, no more metadata bytes will ever be appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segments {
    pub metadata: Vec<u8>,
    pub content: Vec<u8>,
    pub metadata_closed: bool,
}

impl Segments {
    #[must_use]
    pub fn take_metadata(&mut self) -> Vec<u8> {
        mem::take(&mut self.metadata)
    }

    #[must_use]
    pub fn take_content(&mut self) -> Vec<u8> {
        mem::take(&mut self.content)
    }
}

/// Result of one [`Segmenter::feed`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Bytes consumed from the front of the buffer passed in.
    pub consumed: usize,
    /// `true` once end of input has been fully processed.
    pub finished: bool,
}

/// Routes scanner tokens into a metadata segment and a content segment.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────┐
/// │ Token              │ Destination                              │
/// ├────────────────────┼──────────────────────────────────────────┤
/// │ Open / Close       │ metadata if emit_delimiters, else none   │
/// │ Byte inside block  │ metadata                                 │
/// │ Separator          │ none                                     │
/// │ Byte after block   │ content                                  │
/// └────────────────────┴──────────────────────────────────────────┘
/// ```
///
/// The metadata segment is closed when the block closes or when the
/// stream turns out not to start with frontmatter. Once the scanner is in
/// the body, the rest of every buffer is copied to content in one go.
#[derive(Clone, Debug)]
pub struct Segmenter {
    scanner: Scanner,
    emit_delimiters: bool,
}

impl Segmenter {
    #[must_use]
    pub fn new(delimiters: Delimiters, emit_delimiters: bool) -> Self {
        Self {
            scanner: Scanner::new(delimiters),
            emit_delimiters,
        }
    }

    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Split a complete in-memory document in one call.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnterminatedBlock`] if the document opens a
    /// frontmatter block and never closes it.
    pub fn split_slice(
        delimiters: Delimiters,
        emit_delimiters: bool,
        data: &[u8],
    ) -> Result<Segments, WireError> {
        let mut segmenter = Self::new(delimiters, emit_delimiters);
        let mut out = Segments::default();
        segmenter.feed(data, true, &mut out)?;
        Ok(out)
    }

    /// Consume as much of `data` as can be decided, appending routed bytes
    /// to `out`.
    ///
    /// Unconsumed bytes (a possible partial delimiter) must be passed
    /// again, at the front of the next buffer. With `at_eof = true` the
    /// whole buffer is always consumed.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnterminatedBlock`] when input ends inside the
    /// frontmatter block.
    pub fn feed(
        &mut self,
        data: &[u8],
        at_eof: bool,
        out: &mut Segments,
    ) -> Result<Progress, WireError> {
        let mut pos = 0;

        loop {
            if self.scanner.state() == ScanState::Body {
                let rest = &data[pos..];
                out.content.extend_from_slice(rest);
                out.metadata_closed = true;
                self.scanner.skip_body(rest.len());
                return Ok(Progress {
                    consumed: data.len(),
                    finished: at_eof,
                });
            }

            match self.scanner.step(&data[pos..], at_eof) {
                Step::NeedMore => {
                    return Ok(Progress {
                        consumed: pos,
                        finished: false,
                    });
                }
                Step::Finished => {
                    if self.scanner.awaiting_end_token() {
                        return Err(WireError::UnterminatedBlock {
                            offset: self.scanner.offset(),
                        });
                    }
                    out.metadata_closed = true;
                    return Ok(Progress {
                        consumed: pos,
                        finished: true,
                    });
                }
                Step::Advance { consumed, token } => {
                    let matched = &data[pos..pos + consumed];
                    pos += consumed;
                    match token {
                        Token::Open => {
                            if self.emit_delimiters {
                                out.metadata.extend_from_slice(matched);
                            }
                        }
                        Token::Close => {
                            if self.emit_delimiters {
                                out.metadata.extend_from_slice(matched);
                            }
                            out.metadata_closed = true;
                        }
                        Token::Separator => {}
                        Token::Byte(b) => {
                            if self.scanner.awaiting_end_token() {
                                out.metadata.push(b);
                            } else {
                                out.metadata_closed = true;
                                out.content.push(b);
                            }
                        }
                    }
                }
            }
        }
    }
}
