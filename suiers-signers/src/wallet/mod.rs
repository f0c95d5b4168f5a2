mod ed25519;
pub use ed25519::Ed25519Signer;

mod ecdsa;
pub use self::ecdsa::{Secp256k1Signer, Secp256r1Signer};

use suiers_core::{
    codec::EncodingError,
    types::{SignatureError, SignatureScheme},
};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error thrown by the wallet module
pub enum WalletError {
    /// Secret bytes which are not a valid private key of the scheme. The bytes themselves
    /// are never part of the error.
    #[error("invalid {scheme} private key ({len} bytes)")]
    InvalidKey { scheme: SignatureScheme, len: usize },
    /// A scheme which cannot sign with a single private key
    #[error("signature scheme {0} cannot sign with a private key")]
    UnsupportedScheme(SignatureScheme),
    /// Error propagated from the signature crates
    #[error(transparent)]
    CryptoError(#[from] suiers_core::k256::ecdsa::signature::Error),
    /// Error propagated from the hex crate.
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
    /// Error propagated from the base64 crate.
    #[error(transparent)]
    Base64Error(#[from] base64::DecodeError),
    #[error(transparent)]
    SignatureError(#[from] SignatureError),
    #[error(transparent)]
    EncodingError(#[from] EncodingError),
}
