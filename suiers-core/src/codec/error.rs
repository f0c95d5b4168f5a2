use thiserror::Error;

/// An error raised while turning the data model into canonical bytes.
///
/// Encoding is deterministic, so none of these are transient: the input has to be fixed
/// before encoding it again can succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A field without which the transaction cannot be encoded was left unset
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A sequence is longer than the protocol allows
    #[error("`{field}` has {len} elements, exceeding the protocol maximum of {max}")]
    SequenceTooLong { field: &'static str, len: usize, max: usize },
    /// A value does not fit into the width of the field it is encoded into
    #[error("`{field}` value {value} does not fit in a {width}")]
    ValueOutOfRange { field: &'static str, value: u128, width: &'static str },
    /// Two sequences which must pair up element by element have different lengths
    #[error("`{left}` has {left_len} elements but `{right}` has {right_len}")]
    LengthMismatch { left: &'static str, left_len: usize, right: &'static str, right_len: usize },
    /// A Move identifier which the VM would reject
    #[error("invalid Move identifier `{0}`")]
    InvalidIdentifier(String),
    /// A type tag nests deeper than the protocol allows
    #[error("type argument nesting depth {depth} exceeds the protocol maximum of {max}")]
    TypeTooDeep { depth: usize, max: usize },
    /// Pre-encoded transaction bytes cannot be turned back into the data model
    #[error("the transaction is already encoded")]
    AlreadyEncoded,
    /// Pre-encoded transaction bytes were empty
    #[error("pre-encoded transaction bytes are empty")]
    EmptyPayload,
    /// The serializer rejected the value
    #[error(transparent)]
    Bcs(#[from] bcs::Error),
    /// Pre-encoded transaction bytes were not valid base64
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}
