//! Hashing as done by Sui validators.

use crate::{
    codec::{to_bcs, EncodingError},
    types::{Bytes, Digest, Intent},
};
use blake2::{digest::consts::U32, Blake2b, Digest as _};

type Blake2b256 = Blake2b<U32>;

/// Compute the Blake2b-256 hash of input bytes.
pub fn blake2b256<T: AsRef<[u8]>>(bytes: T) -> [u8; 32] {
    Blake2b256::digest(bytes.as_ref()).into()
}

/// Prefixes `message` with the intent header. This is the preimage of the digest that
/// gets signed.
pub fn intent_message<T: AsRef<[u8]>>(intent: Intent, message: T) -> Vec<u8> {
    let message = message.as_ref();
    let mut framed = Vec::with_capacity(3 + message.len());
    framed.extend_from_slice(&intent.to_bytes());
    framed.extend_from_slice(message);
    framed
}

/// Hash an already encoded message under `intent`: `Blake2b256(intent || message)`
pub fn hash_intent_message<T: AsRef<[u8]>>(intent: Intent, message: T) -> Digest {
    let mut hasher = Blake2b256::new();
    hasher.update(intent.to_bytes());
    hasher.update(message.as_ref());
    Digest(hasher.finalize().into())
}

/// The preimage of a signed personal message.
///
/// Unlike transactions the message is a BCS byte vector, so it carries a length prefix:
/// `[3, 0, 0] || uleb128(len) || message`
pub fn personal_message_preimage<T: AsRef<[u8]>>(message: T) -> Result<Bytes, EncodingError> {
    let encoded = to_bcs(message.as_ref())?;
    Ok(intent_message(Intent::personal_message(), encoded).into())
}

/// Hash a personal message the way wallets sign it
pub fn hash_personal_message<T: AsRef<[u8]>>(message: T) -> Result<Digest, EncodingError> {
    Ok(Digest(blake2b256(personal_message_preimage(message)?)))
}
