use serde::{
    de::{Error, Unexpected},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, ops::Deref, str::FromStr};

/// Wrapper type around Bytes to deserialize/serialize "0x" prefixed hex strings. Binary
/// formats see a length prefixed `vector<u8>` instead.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct Bytes(
    #[serde(serialize_with = "serialize_bytes", deserialize_with = "deserialize_bytes")]
    pub bytes::Bytes,
);

impl Bytes {
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_ref().to_vec()
    }

    /// Standard, padded base64 as used by Sui RPC and wallets
    pub fn to_base64(&self) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(self.as_ref())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        use base64::Engine as _;
        Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?.into())
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes(0x{})", hex::encode(self.as_ref()))
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_ref()))
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<bytes::Bytes> for Bytes {
    fn from(src: bytes::Bytes) -> Self {
        Self(src)
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(src: Vec<u8>) -> Self {
        Self(src.into())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(src: [u8; N]) -> Self {
        src.to_vec().into()
    }
}

impl From<&[u8]> for Bytes {
    fn from(src: &[u8]) -> Self {
        src.to_vec().into()
    }
}

impl FromStr for Bytes {
    type Err = hex::FromHexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        Ok(hex::decode(value)?.into())
    }
}

pub fn serialize_bytes<S, T>(x: T, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    if s.is_human_readable() {
        s.serialize_str(&format!("0x{}", hex::encode(x.as_ref())))
    } else {
        s.serialize_bytes(x.as_ref())
    }
}

pub fn deserialize_bytes<'de, D>(d: D) -> Result<bytes::Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    if !d.is_human_readable() {
        return Vec::<u8>::deserialize(d).map(Into::into)
    }
    let value = String::deserialize(d)?;
    if let Some(value) = value.strip_prefix("0x") {
        let bytes: Vec<u8> =
            hex::decode(value).map_err(|e| Error::custom(format!("Invalid hex: {e}")))?;
        Ok(bytes.into())
    } else {
        Err(Error::invalid_value(Unexpected::Str(&value), &"0x prefix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        let b = Bytes::from(vec![1, 35, 69, 103, 137, 171, 205, 239]);
        let expected = "0x0123456789abcdef";
        assert_eq!(format!("{b}"), expected);
        assert_eq!(format!("{b:?}"), "Bytes(0x0123456789abcdef)");
    }

    #[test]
    fn serde_hex() {
        let b: Bytes = serde_json::from_str("\"0xdeadbeef\"").unwrap();
        assert_eq!(b.as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"0xdeadbeef\"");
        assert!(serde_json::from_str::<Bytes>("\"deadbeef\"").is_err());
    }

    #[test]
    fn binary_is_length_prefixed() {
        let b = Bytes::from(vec![0xde, 0xad]);
        assert_eq!(bcs::to_bytes(&b).unwrap(), vec![2, 0xde, 0xad]);
        assert_eq!(bcs::from_bytes::<Bytes>(&[2, 0xde, 0xad]).unwrap(), b);
    }

    #[test]
    fn base64_roundtrip() {
        let b = Bytes::from([0u8, 0, 0, 1]);
        assert_eq!(b.to_base64(), "AAAAAQ==");
        assert_eq!(Bytes::from_base64("AAAAAQ==").unwrap(), b);
    }
}
