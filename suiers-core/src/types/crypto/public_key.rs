use super::{SignatureError, SignatureScheme};
use crate::{
    types::{Digest, SuiAddress},
    utils::blake2b256,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{
    Signature as Ed25519Signature, Verifier as _, VerifyingKey as Ed25519VerifyingKey,
};
use k256::ecdsa::signature::DigestVerifier;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// A public key of a single-key signature scheme.
///
/// The bytes are checked to be a valid key of the scheme on construction: 32 bytes for
/// Ed25519 and a 33 byte compressed SEC1 point for the ECDSA curves.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    scheme: SignatureScheme,
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn new<T: Into<Vec<u8>>>(
        scheme: SignatureScheme,
        bytes: T,
    ) -> Result<Self, SignatureError> {
        let bytes = bytes.into();
        let malformed = || SignatureError::MalformedPublicKey { scheme, len: bytes.len() };

        let expected =
            scheme.public_key_length().ok_or(SignatureError::UnsupportedScheme(scheme))?;
        if bytes.len() != expected {
            return Err(malformed())
        }
        let valid = match scheme {
            SignatureScheme::ED25519 => ed25519_key(&bytes).is_some(),
            SignatureScheme::Secp256k1 => {
                k256::ecdsa::VerifyingKey::from_sec1_bytes(&bytes).is_ok()
            }
            SignatureScheme::Secp256r1 => {
                p256::ecdsa::VerifyingKey::from_sec1_bytes(&bytes).is_ok()
            }
            SignatureScheme::MultiSig => false,
        };
        if !valid {
            return Err(malformed())
        }
        Ok(Self { scheme, bytes })
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `flag || key`, the form keys are hashed and exchanged in
    pub fn to_flagged_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.bytes.len());
        out.push(self.scheme.flag());
        out.extend_from_slice(&self.bytes);
        out
    }

    pub fn from_flagged_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let (&flag, key) = bytes.split_first().ok_or(SignatureError::InvalidLength(0))?;
        let scheme =
            SignatureScheme::try_from(flag).map_err(|_| SignatureError::UnknownScheme(flag))?;
        Self::new(scheme, key)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_flagged_bytes())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, SignatureError> {
        Self::from_flagged_bytes(&STANDARD.decode(encoded)?)
    }

    /// The address owning this key: `Blake2b256(flag || key)`
    pub fn to_sui_address(&self) -> SuiAddress {
        SuiAddress(blake2b256(self.to_flagged_bytes()))
    }

    /// Verifies a raw signature over a signing digest.
    ///
    /// Ed25519 signatures are over the digest itself. They are checked with the cofactorless
    /// `verify` rather than `verify_strict`, so small order keys and nonces are accepted as
    /// the validators' ZIP-215 rules accept them. Non-canonical point encodings, which
    /// ZIP-215 also tolerates, are still rejected.
    ///
    /// ECDSA signatures are over `SHA-256(digest)` and must have a low `s`.
    pub fn verify(&self, digest: &Digest, signature: &[u8]) -> Result<(), SignatureError> {
        let expected = self
            .scheme
            .signature_length()
            .ok_or(SignatureError::UnsupportedScheme(self.scheme))?;
        if signature.len() != expected {
            return Err(SignatureError::SchemeMismatch {
                scheme: self.scheme,
                expected,
                got: signature.len(),
            })
        }

        let verified = match self.scheme {
            SignatureScheme::ED25519 => {
                let key = ed25519_key(&self.bytes).ok_or_else(|| self.malformed())?;
                let sig: [u8; 64] = signature
                    .try_into()
                    .map_err(|_| SignatureError::InvalidLength(signature.len()))?;
                key.verify(digest.as_ref(), &Ed25519Signature::from_bytes(&sig)).is_ok()
            }
            SignatureScheme::Secp256k1 => {
                let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|_| self.malformed())?;
                match k256::ecdsa::Signature::from_slice(signature) {
                    Ok(sig) if sig.normalize_s().is_none() => {
                        key.verify_digest(Sha256::new_with_prefix(digest), &sig).is_ok()
                    }
                    _ => false,
                }
            }
            SignatureScheme::Secp256r1 => {
                let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&self.bytes)
                    .map_err(|_| self.malformed())?;
                match p256::ecdsa::Signature::from_slice(signature) {
                    Ok(sig) if sig.normalize_s().is_none() => {
                        key.verify_digest(Sha256::new_with_prefix(digest), &sig).is_ok()
                    }
                    _ => false,
                }
            }
            SignatureScheme::MultiSig => {
                return Err(SignatureError::UnsupportedScheme(self.scheme))
            }
        };

        if verified {
            Ok(())
        } else {
            Err(SignatureError::VerificationFailed)
        }
    }

    fn malformed(&self) -> SignatureError {
        SignatureError::MalformedPublicKey { scheme: self.scheme, len: self.bytes.len() }
    }
}

fn ed25519_key(bytes: &[u8]) -> Option<Ed25519VerifyingKey> {
    let bytes: &[u8; 32] = bytes.try_into().ok()?;
    Ed25519VerifyingKey::from_bytes(bytes).ok()
}

impl From<&PublicKey> for SuiAddress {
    fn from(key: &PublicKey) -> Self {
        key.to_sui_address()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}, 0x{})", self.scheme, hex::encode(&self.bytes))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_base64(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // the Ed25519 key of the RFC 8032 "TEST 1" vector
    const ED25519_PK: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

    #[test]
    fn widths_are_checked() {
        assert!(PublicKey::new(SignatureScheme::ED25519, ED25519_PK).is_ok());
        assert_eq!(
            PublicKey::new(SignatureScheme::ED25519, &ED25519_PK[..31]).unwrap_err(),
            SignatureError::MalformedPublicKey { scheme: SignatureScheme::ED25519, len: 31 }
        );
        // an ed25519 key is not a compressed curve point
        assert!(PublicKey::new(SignatureScheme::Secp256k1, ED25519_PK).is_err());
        assert_eq!(
            PublicKey::new(SignatureScheme::MultiSig, vec![0u8; 10]).unwrap_err(),
            SignatureError::UnsupportedScheme(SignatureScheme::MultiSig)
        );
    }

    #[test]
    fn secp256k1_generator_is_valid() {
        let g = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        let key = PublicKey::new(SignatureScheme::Secp256k1, g).unwrap();
        assert_eq!(key.to_flagged_bytes()[0], 1);
        assert_eq!(key.to_flagged_bytes().len(), 34);
    }

    #[test]
    fn address_is_hash_of_flagged_key() {
        let key = PublicKey::new(SignatureScheme::ED25519, ED25519_PK).unwrap();
        let mut flagged = vec![0u8];
        flagged.extend(ED25519_PK);
        assert_eq!(key.to_sui_address(), SuiAddress(blake2b256(flagged)));
        assert_eq!(SuiAddress::from(&key), key.to_sui_address());
    }

    #[test]
    fn small_order_ed25519_is_accepted() {
        // the identity point as key and nonce with s = 0 satisfies the verification
        // equation for every message
        let mut identity = [0u8; 32];
        identity[0] = 1;
        let key = PublicKey::new(SignatureScheme::ED25519, identity).unwrap();
        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&identity);

        assert!(key.verify(&Digest([7u8; 32]), &sig).is_ok());
        let strict = ed25519_key(&identity)
            .unwrap()
            .verify_strict(&[7u8; 32], &Ed25519Signature::from_bytes(&sig));
        assert!(strict.is_err());
    }

    #[test]
    fn base64_roundtrip() {
        let key = PublicKey::new(SignatureScheme::ED25519, ED25519_PK).unwrap();
        assert_eq!(PublicKey::from_base64(&key.to_base64()).unwrap(), key);

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), key);
        assert_eq!(
            PublicKey::from_flagged_bytes(&[9, 1, 2]).unwrap_err(),
            SignatureError::UnknownScheme(9)
        );
    }
}
