use std::io;

use particle_types::CodecError;
use particle_wire::WireError;

/// Errors that can occur while splitting and decoding a document.
///
/// ```text
///   DecodeError
///   ├── Unmarshal(CodecError) ← codec rejected the metadata (verbatim)
///   ├── Wire(WireError)       ← malformed frontmatter framing
///   └── Io(std::io::Error)    ← input read failure, timeout, cancellation
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Unmarshal(#[from] CodecError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(io::Error),
}

/// Segment readers carry framing errors inside an `io::Error`; pull them
/// back out so callers can match on [`DecodeError::Wire`].
impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        match err.get_ref().and_then(|inner| inner.downcast_ref::<WireError>()) {
            Some(wire) => Self::Wire(wire.clone()),
            None => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_wire_error_is_recovered() {
        let io = io::Error::new(
            io::ErrorKind::InvalidData,
            WireError::UnterminatedBlock { offset: 9 },
        );
        let err = DecodeError::from(io);
        assert!(matches!(err, DecodeError::Wire(WireError::UnterminatedBlock { offset: 9 })));
    }

    #[test]
    fn plain_io_error_stays_io() {
        let err = DecodeError::from(io::Error::from(io::ErrorKind::TimedOut));
        assert!(matches!(err, DecodeError::Io(ref e) if e.kind() == io::ErrorKind::TimedOut));
    }

    #[test]
    fn unmarshal_error_displays_verbatim() {
        let err = DecodeError::from(CodecError::custom("bad metadata"));
        assert_eq!(err.to_string(), "bad metadata");
    }
}
