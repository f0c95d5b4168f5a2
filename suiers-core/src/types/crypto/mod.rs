//! Signature schemes, public keys and the self-describing signatures Sui verifies.
mod scheme;
pub use scheme::SignatureScheme;

mod public_key;
pub use public_key::PublicKey;

mod signature;
pub use signature::AssembledSignature;

use thiserror::Error;

/// An error involving a public key or a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A flag byte which does not name any scheme
    #[error("unknown signature scheme flag {0}")]
    UnknownScheme(u8),
    /// A known scheme for which single-key signatures cannot be produced or parsed
    #[error("signature scheme {0} is not supported")]
    UnsupportedScheme(SignatureScheme),
    /// A raw signature whose width is not the one its public key's scheme produces
    #[error("{scheme} signatures are {expected} bytes, got {got}")]
    SchemeMismatch { scheme: SignatureScheme, expected: usize, got: usize },
    /// Public key bytes of the wrong width, or not a point of the scheme's curve
    #[error("malformed {scheme} public key ({len} bytes)")]
    MalformedPublicKey { scheme: SignatureScheme, len: usize },
    /// A serialized signature too short or too long for its scheme
    #[error("invalid serialized signature length {0}")]
    InvalidLength(usize),
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// The signature does not match the digest and public key
    #[error("signature verification failed")]
    VerificationFailed,
}
