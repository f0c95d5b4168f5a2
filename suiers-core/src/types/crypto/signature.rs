use super::{PublicKey, SignatureError, SignatureScheme};
use crate::types::Digest;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A self-describing signature: `flag || signature || public key`.
///
/// This is the form in which Sui expects a single-key signature next to a transaction,
/// rendered as base64. The flag is always the one of the public key's scheme.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssembledSignature {
    signature: Vec<u8>,
    public_key: PublicKey,
}

impl AssembledSignature {
    /// Packs a raw signature with the key that produced it
    pub fn assemble(signature: &[u8], public_key: &PublicKey) -> Result<Self, SignatureError> {
        let scheme = public_key.scheme();
        let expected =
            scheme.signature_length().ok_or(SignatureError::UnsupportedScheme(scheme))?;
        if signature.len() != expected {
            return Err(SignatureError::SchemeMismatch { scheme, expected, got: signature.len() })
        }
        Ok(Self { signature: signature.to_vec(), public_key: public_key.clone() })
    }

    /// Packs a raw signature with the raw bytes of the key that produced it, for callers
    /// who only know the scheme by its flag
    pub fn assemble_raw(
        scheme: SignatureScheme,
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<Self, SignatureError> {
        Self::assemble(signature, &PublicKey::new(scheme, public_key)?)
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.public_key.scheme()
    }

    pub fn signature_bytes(&self) -> &[u8] {
        &self.signature
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let key = self.public_key.as_bytes();
        let mut out = Vec::with_capacity(1 + self.signature.len() + key.len());
        out.push(self.scheme().flag());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(key);
        out
    }

    /// Parses `flag || signature || public key`. Multisig aggregates are recognized but not
    /// supported.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let (&flag, rest) = bytes.split_first().ok_or(SignatureError::InvalidLength(0))?;
        let scheme =
            SignatureScheme::try_from(flag).map_err(|_| SignatureError::UnknownScheme(flag))?;

        let (Some(sig_len), Some(key_len)) =
            (scheme.signature_length(), scheme.public_key_length())
        else {
            return Err(SignatureError::UnsupportedScheme(scheme))
        };
        if rest.len() != sig_len + key_len {
            return Err(SignatureError::InvalidLength(bytes.len()))
        }

        let (signature, key) = rest.split_at(sig_len);
        Self::assemble_raw(scheme, signature, key)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, SignatureError> {
        Self::from_bytes(&STANDARD.decode(encoded)?)
    }

    /// Verifies the signature over `digest` with the embedded public key
    pub fn verify(&self, digest: &Digest) -> Result<(), SignatureError> {
        self.public_key.verify(digest, &self.signature)
    }
}

impl fmt::Display for AssembledSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for AssembledSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssembledSignature")
            .field("scheme", &self.scheme())
            .field("signature", &hex::encode(&self.signature))
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl FromStr for AssembledSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl Serialize for AssembledSignature {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for AssembledSignature {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_base64(&s).map_err(D::Error::custom)
    }
}
