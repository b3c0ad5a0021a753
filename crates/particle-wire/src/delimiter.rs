use crate::error::WireError;

/// Token for YAML frontmatter.
pub const YAML_DELIMITER: &str = "---";

/// Token for TOML frontmatter.
pub const TOML_DELIMITER: &str = "+++";

/// Token pair for JSON frontmatter. The braces are the JSON object's own
/// braces, each alone on its line.
pub const JSON_DELIMITER_PAIR: &str = "{ }";

/// How a configuration token is turned into start and end markers.
///
/// ```text
/// ┌────────────────────┬──────────┬───────┬───────┐
/// │ Style              │ Token    │ Start │ End   │
/// ├────────────────────┼──────────┼───────┼───────┤
/// │ SingleToken        │ "---"    │ "---" │ "---" │
/// │ SpaceSeparatedPair │ "{ }"    │ "{"   │ "}"   │
/// └────────────────────┴──────────┴───────┴───────┘
/// ```
///
/// Both styles match the markers as whole lines: the start marker must be
/// the first line of the stream, the end marker must follow a newline and
/// be followed by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelimiterStyle {
    #[default]
    SingleToken,
    SpaceSeparatedPair,
}

impl DelimiterStyle {
    /// Derive the start/end markers for `token`.
    ///
    /// # Errors
    ///
    /// - [`WireError::EmptyDelimiter`] if the token (or either half of a
    ///   pair) is empty.
    /// - [`WireError::MultilineDelimiter`] if the token contains a line
    ///   break.
    /// - [`WireError::InvalidDelimiterPair`] if a paired token does not
    ///   split on single spaces into exactly two parts.
    pub fn derive(self, token: &str) -> Result<Delimiters, WireError> {
        if token.is_empty() {
            return Err(WireError::EmptyDelimiter);
        }
        if token.contains(['\n', '\r']) {
            return Err(WireError::MultilineDelimiter {
                token: token.to_string(),
            });
        }

        match self {
            Self::SingleToken => Ok(Delimiters::from_parts(token, token, token)),
            Self::SpaceSeparatedPair => {
                let parts: Vec<&str> = token.split(' ').collect();
                if parts.len() != 2 {
                    return Err(WireError::InvalidDelimiterPair {
                        delimiter: token.to_string(),
                        parts: parts.len(),
                    });
                }
                if parts.iter().any(|p| p.is_empty()) {
                    return Err(WireError::EmptyDelimiter);
                }
                Ok(Delimiters::from_parts(token, parts[0], parts[1]))
            }
        }
    }
}

/// Start and end markers of a frontmatter block, with the byte patterns
/// the scanner matches against precomputed.
///
/// ```text
///   open        = start + "\n"          first line of the stream
///   close       = "\n" + end + "\n"     end marker on its own line
///   empty_close = end + "\n"            end marker right after open
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiters {
    token: String,
    start: String,
    end: String,
    open: Vec<u8>,
    close: Vec<u8>,
    empty_close: Vec<u8>,
}

impl Delimiters {
    fn from_parts(token: &str, start: &str, end: &str) -> Self {
        let open = format!("{start}\n").into_bytes();
        let close = format!("\n{end}\n").into_bytes();
        let empty_close = format!("{end}\n").into_bytes();
        Self {
            token: token.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            open,
            close,
            empty_close,
        }
    }

    /// Single-token delimiters (`start == end == token`).
    ///
    /// # Errors
    ///
    /// See [`DelimiterStyle::derive`].
    pub fn single(token: &str) -> Result<Self, WireError> {
        DelimiterStyle::SingleToken.derive(token)
    }

    /// Paired delimiters from a `"<start> <end>"` token.
    ///
    /// # Errors
    ///
    /// See [`DelimiterStyle::derive`].
    pub fn pair(token: &str) -> Result<Self, WireError> {
        DelimiterStyle::SpaceSeparatedPair.derive(token)
    }

    /// The configuration token these delimiters were derived from.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    pub(crate) fn open_pattern(&self) -> &[u8] {
        &self.open
    }

    pub(crate) fn close_pattern(&self) -> &[u8] {
        &self.close
    }

    pub(crate) fn empty_close_pattern(&self) -> &[u8] {
        &self.empty_close
    }
}
