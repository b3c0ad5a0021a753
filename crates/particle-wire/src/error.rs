/// Errors raised by the delimiter layer.
///
/// The first three variants are configuration errors: they are reported
/// once, when a delimiter token is turned into [`Delimiters`], and never
/// during a scan. `UnterminatedBlock` is the only error a scan can
/// produce.
///
/// ```text
///   WireError
///   ├── EmptyDelimiter        ← token (or one half of a pair) is ""
///   ├── MultilineDelimiter    ← token contains '\n' or '\r'
///   ├── InvalidDelimiterPair  ← paired token did not split into two
///   └── UnterminatedBlock     ← input ended inside the metadata block
/// ```
///
/// [`Delimiters`]: crate::delimiter::Delimiters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("delimiter token is empty")]
    EmptyDelimiter,

    /// Delimiters are matched as whole lines, so a token spanning lines
    /// could never be recognized.
    #[error("delimiter token {token:?} spans more than one line")]
    MultilineDelimiter { token: String },

    /// A paired configuration must be exactly `"<start> <end>"`.
    #[error("delimiter {delimiter:?} does not split into exactly two tokens (got {parts})")]
    InvalidDelimiterPair { delimiter: String, parts: usize },

    /// The input ended after the opening delimiter but before the
    /// closing one. `offset` is the total number of bytes consumed.
    #[error("frontmatter block opened but never closed (input ended at offset {offset})")]
    UnterminatedBlock { offset: usize },
}
