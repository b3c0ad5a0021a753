use crate::delimiter::Delimiters;

/// A token produced by one [`Scanner::step`].
///
/// `Open` and `Close` are the synthetic delimiter tokens; the bytes they
/// consumed are the full delimiter line(s). `Separator` is the single
/// blank line written between the closing delimiter and the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Separator,
    Byte(u8),
}

/// Outcome of one scanner step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Consume `consumed` bytes from the front of the buffer and emit
    /// `token`.
    Advance { consumed: usize, token: Token },

    /// The buffer is a strict prefix of a delimiter that could still
    /// match. Call again with more bytes (or with `at_eof = true`).
    NeedMore,

    /// End of input with an empty buffer. Nothing more will be emitted.
    Finished,
}

/// Where the scanner is relative to the frontmatter block.
///
/// ```text
///            open matched               close matched
///   Start ─────────────────► Inside ─────────────────► AfterClose
///     │                        │ ▲                          │
///     │ no open at offset 0    └─┘ one byte                 │ separator or
///     ▼                                                     ▼ first byte
///   Body ◄──────────────────────────────────────────────────┘
/// ```
///
/// `Inside { fresh: true }` marks the first position after the opening
/// delimiter, the only place an end marker without a leading newline is
/// accepted (an empty block).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    Start,
    Inside { fresh: bool },
    AfterClose,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Match {
    Full,
    Partial,
    Miss,
}

/// Compare `pattern` against the front of `data`.
///
/// A short buffer that agrees with the pattern so far is only `Partial`
/// while more input can arrive; at end of input it is a miss.
fn match_prefix(pattern: &[u8], data: &[u8], at_eof: bool) -> Match {
    if data.len() >= pattern.len() {
        if data.starts_with(pattern) {
            Match::Full
        } else {
            Match::Miss
        }
    } else if !at_eof && pattern.starts_with(data) {
        Match::Partial
    } else {
        Match::Miss
    }
}

/// Incremental, restartable frontmatter delimiter scanner.
///
/// The scanner is a pure function of `(buffered bytes, at_eof)` plus its
/// own state. It never looks at bytes it has already consumed, so any
/// reader can drive it: keep the unconsumed tail of the buffer, append
/// new input, call [`step`](Self::step) again.
///
/// Matching rules:
///
/// 1. The open pattern (`start + "\n"`) is tried once, at offset 0. If
///    it does not match there the stream has no frontmatter.
/// 2. Inside the block the close pattern (`"\n" + end + "\n"`) is tried
///    at every position.
/// 3. Everything else is consumed one byte at a time.
///
/// The result is identical no matter how the input is chunked.
///
/// # Example
///
/// ```rust
/// use particle_wire::{Delimiters, Scanner, Step, Token};
///
/// let delims = Delimiters::single("---").unwrap();
/// let mut scanner = Scanner::new(delims);
///
/// // Not enough bytes to decide yet.
/// assert_eq!(scanner.step(b"--", false), Step::NeedMore);
/// assert_eq!(
///     scanner.step(b"---\nkey: v\n---\n", false),
///     Step::Advance { consumed: 4, token: Token::Open }
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Scanner {
    delimiters: Delimiters,
    state: ScanState,
    offset: usize,
}

impl Scanner {
    #[must_use]
    pub fn new(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            state: ScanState::Start,
            offset: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    #[must_use]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Total bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `true` once the offset-0 check for the opening delimiter has been
    /// decided, whichever way it went.
    #[must_use]
    pub fn has_seen_first_token(&self) -> bool {
        self.state != ScanState::Start
    }

    /// `true` while inside the frontmatter block.
    #[must_use]
    pub fn awaiting_end_token(&self) -> bool {
        matches!(self.state, ScanState::Inside { .. })
    }

    /// Run one scan step over the front of `data`.
    ///
    /// `data` must begin at the first unconsumed byte. After an
    /// `Advance`, drop `consumed` bytes from the front before the next
    /// call.
    pub fn step(&mut self, data: &[u8], at_eof: bool) -> Step {
        if data.is_empty() {
            return if at_eof { Step::Finished } else { Step::NeedMore };
        }

        match self.state {
            ScanState::Start => {
                let open = self.delimiters.open_pattern();
                match match_prefix(open, data, at_eof) {
                    Match::Full => {
                        let len = open.len();
                        self.state = ScanState::Inside { fresh: true };
                        return self.advance(len, Token::Open);
                    }
                    Match::Partial => return Step::NeedMore,
                    Match::Miss => self.state = ScanState::Body,
                }
            }
            ScanState::Inside { fresh } => {
                if fresh {
                    let empty_close = self.delimiters.empty_close_pattern();
                    match match_prefix(empty_close, data, at_eof) {
                        Match::Full => {
                            let len = empty_close.len();
                            self.state = ScanState::AfterClose;
                            return self.advance(len, Token::Close);
                        }
                        Match::Partial => return Step::NeedMore,
                        Match::Miss => {}
                    }
                }

                let close = self.delimiters.close_pattern();
                match match_prefix(close, data, at_eof) {
                    Match::Full => {
                        let len = close.len();
                        self.state = ScanState::AfterClose;
                        return self.advance(len, Token::Close);
                    }
                    Match::Partial => return Step::NeedMore,
                    Match::Miss => self.state = ScanState::Inside { fresh: false },
                }
            }
            ScanState::AfterClose => {
                self.state = ScanState::Body;
                if data[0] == b'\n' {
                    return self.advance(1, Token::Separator);
                }
            }
            ScanState::Body => {}
        }

        self.advance(1, Token::Byte(data[0]))
    }

    /// Account for `len` body bytes consumed without stepping.
    ///
    /// Only valid in [`ScanState::Body`], where every step would emit a
    /// single `Byte` anyway.
    pub(crate) fn skip_body(&mut self, len: usize) {
        debug_assert_eq!(self.state, ScanState::Body);
        self.offset += len;
    }

    fn advance(&mut self, consumed: usize, token: Token) -> Step {
        self.offset += consumed;
        Step::Advance { consumed, token }
    }
}
