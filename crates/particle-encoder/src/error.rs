use particle_types::CodecError;

/// Errors that can occur while joining frontmatter and content.
///
/// ```text
///   EncodeError
///   ├── Marshal(CodecError)  ← the codec rejected the value
///   ├── Unframeable          ← the serialized block would not decode back
///   └── Io(std::io::Error)   ← from the destination writer
/// ```
///
/// A marshal or framing failure leaves both the output and the profile's
/// cache untouched.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Marshal(#[from] CodecError),

    /// The codec output does not open with the start delimiter, or it
    /// contains a delimiter line that would end the block early.
    #[error("serialized frontmatter cannot be framed by delimiter {delimiter:?}")]
    Unframeable { delimiter: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
