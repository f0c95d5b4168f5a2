use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Width in bytes of every digest on the network
pub const DIGEST_LENGTH: usize = 32;

/// The 32-byte Blake2b-256 hash of an intent message. This is the value that gets signed.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LENGTH]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x{})", hex::encode(self.0))
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        let bytes: [u8; DIGEST_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseDigestError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Error parsing a digest: base58 for object and transaction digests, hex for signing
/// digests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseDigestError {
    #[error(transparent)]
    Base58(#[from] bs58::decode::Error),
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    #[error("digest must be {DIGEST_LENGTH} bytes, got {0}")]
    InvalidLength(usize),
}

macro_rules! base58_digest {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; DIGEST_LENGTH]);

        impl $name {
            pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
                &self.0
            }

            pub fn to_base58(&self) -> String {
                bs58::encode(self.0).into_string()
            }
        }

        impl From<[u8; DIGEST_LENGTH]> for $name {
            fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseDigestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = bs58::decode(s).into_vec()?;
                let bytes: [u8; DIGEST_LENGTH] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| ParseDigestError::InvalidLength(bytes.len()))?;
                Ok(Self(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base58())
            }
        }

        /// Base58 for humans. On the wire a digest is a byte vector with a `0x20` length
        /// prefix.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                if s.is_human_readable() {
                    s.serialize_str(&self.to_base58())
                } else {
                    s.serialize_bytes(&self.0)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                if d.is_human_readable() {
                    let s = String::deserialize(d)?;
                    return s.parse().map_err(D::Error::custom)
                }
                let bytes = Vec::<u8>::deserialize(d)?;
                let len = bytes.len();
                bytes
                    .try_into()
                    .map(Self)
                    .map_err(|_| D::Error::custom(ParseDigestError::InvalidLength(len)))
            }
        }
    };
}

base58_digest!(
    /// The digest of an object's contents at a given version
    ObjectDigest
);

base58_digest!(
    /// The network-wide identifier of a transaction
    TransactionDigest
);
