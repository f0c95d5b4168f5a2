use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Width in bytes of addresses and object ids
pub const ADDRESS_LENGTH: usize = 32;

/// Error parsing a hex encoded 32-byte identifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseAddressError {
    #[error("address has {0} hex digits, at most 64 are allowed")]
    TooLong(usize),
    #[error("address is empty")]
    Empty,
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

macro_rules! address_type {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; ADDRESS_LENGTH]);

        impl $name {
            pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

            /// An identifier whose last 8 bytes hold `value` in big endian, e.g. `0x2`
            pub const fn from_u64(value: u64) -> Self {
                let mut bytes = [0u8; ADDRESS_LENGTH];
                let be = value.to_be_bytes();
                let mut i = 0;
                while i < 8 {
                    bytes[ADDRESS_LENGTH - 8 + i] = be[i];
                    i += 1;
                }
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
                &self.0
            }

            /// Full width, `0x` prefixed lowercase hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl From<[u8; ADDRESS_LENGTH]> for $name {
            fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseAddressError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_padded(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        /// A hex string for humans, 32 raw bytes with no length prefix on the wire
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                if s.is_human_readable() {
                    s.serialize_str(&self.to_hex())
                } else {
                    self.0.serialize(s)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                if d.is_human_readable() {
                    let s = String::deserialize(d)?;
                    s.parse().map_err(D::Error::custom)
                } else {
                    <[u8; ADDRESS_LENGTH]>::deserialize(d).map(Self)
                }
            }
        }
    };
}

address_type!(
    /// A Sui account address: the Blake2b-256 hash of a signature scheme flag and a public key
    SuiAddress
);

address_type!(
    /// The id of an on-chain object
    ObjectID
);

impl From<ObjectID> for SuiAddress {
    fn from(id: ObjectID) -> Self {
        Self(id.0)
    }
}

impl From<SuiAddress> for ObjectID {
    fn from(address: SuiAddress) -> Self {
        Self(address.0)
    }
}

/// Parses hex with or without `0x`, left padding short forms like `0x2` with zeros
fn parse_padded(s: &str) -> Result<[u8; ADDRESS_LENGTH], ParseAddressError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(ParseAddressError::Empty)
    }
    if digits.len() > ADDRESS_LENGTH * 2 {
        return Err(ParseAddressError::TooLong(digits.len()))
    }

    let mut padded = String::with_capacity(ADDRESS_LENGTH * 2);
    for _ in digits.len()..ADDRESS_LENGTH * 2 {
        padded.push('0');
    }
    padded.push_str(digits);

    let mut out = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(padded, &mut out)?;
    Ok(out)
}
