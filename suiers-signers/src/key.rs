use crate::{
    wallet::{Ed25519Signer, Secp256k1Signer, Secp256r1Signer, WalletError},
    Signer,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};
use suiers_core::types::{SignatureError, SignatureScheme};
use zeroize::Zeroizing;

/// A private key tagged with the scheme it signs under.
///
/// The secret is wiped from memory when the key is dropped. It is never logged, cloned or
/// serialized: a key is consumed by the call that signs with it.
pub struct KeyMaterial {
    scheme: SignatureScheme,
    secret: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /// Wraps a raw 32-byte secret. Whether the bytes are a valid key of the scheme is
    /// checked once a signer is instantiated from them.
    pub fn new(scheme: SignatureScheme, secret: Vec<u8>) -> Result<Self, WalletError> {
        let secret = Zeroizing::new(secret);
        if !scheme.is_single_key() {
            return Err(WalletError::UnsupportedScheme(scheme))
        }
        if secret.len() != 32 {
            return Err(WalletError::InvalidKey { scheme, len: secret.len() })
        }
        Ok(Self { scheme, secret })
    }

    /// Parses a hex encoded secret, with or without a `0x` prefix
    pub fn from_hex(scheme: SignatureScheme, secret: &str) -> Result<Self, WalletError> {
        let secret = secret.strip_prefix("0x").unwrap_or(secret);
        Self::new(scheme, hex::decode(secret)?)
    }

    /// Parses a base64 encoded `flag || secret`, the format of the Sui keystore
    pub fn from_base64(encoded: &str) -> Result<Self, WalletError> {
        let decoded = Zeroizing::new(STANDARD.decode(encoded)?);
        let (&flag, secret) = decoded.split_first().ok_or(SignatureError::InvalidLength(0))?;
        let scheme =
            SignatureScheme::try_from(flag).map_err(|_| SignatureError::UnknownScheme(flag))?;
        Self::new(scheme, secret.to_vec())
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Instantiates the signer for the key's scheme
    pub fn signer(&self) -> Result<Box<dyn Signer<Error = WalletError>>, WalletError> {
        let signer: Box<dyn Signer<Error = WalletError>> = match self.scheme {
            SignatureScheme::ED25519 => Box::new(Ed25519Signer::from_bytes(&self.secret)?),
            SignatureScheme::Secp256k1 => Box::new(Secp256k1Signer::from_bytes(&self.secret)?),
            SignatureScheme::Secp256r1 => Box::new(Secp256r1Signer::from_bytes(&self.secret)?),
            SignatureScheme::MultiSig => return Err(WalletError::UnsupportedScheme(self.scheme)),
        };
        Ok(signer)
    }
}

impl FromStr for KeyMaterial {
    type Err = WalletError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_base64(src)
    }
}

// do not log the secret
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("scheme", &self.scheme)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Deserializes from `{ "scheme": "ED25519", "secret": "<hex>" }`
impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            scheme: SignatureScheme,
            secret: String,
        }

        let raw = Raw::deserialize(d)?;
        let secret = Zeroizing::new(raw.secret);
        Self::from_hex(raw.scheme, &secret).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    #[test]
    fn debug_is_redacted() {
        let key = KeyMaterial::from_hex(SignatureScheme::ED25519, SECRET).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("ED25519"));
        assert!(!debug.contains(SECRET));
    }

    #[test]
    fn picks_signer_by_scheme() {
        for scheme in
            [SignatureScheme::ED25519, SignatureScheme::Secp256k1, SignatureScheme::Secp256r1]
        {
            let key = KeyMaterial::from_hex(scheme, SECRET).unwrap();
            let signer = key.signer().unwrap();
            assert_eq!(signer.scheme(), scheme);
            assert_eq!(signer.public_key().scheme(), scheme);
        }
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(matches!(
            KeyMaterial::new(SignatureScheme::ED25519, vec![1u8; 31]),
            Err(WalletError::InvalidKey { len: 31, .. })
        ));
        assert!(matches!(
            KeyMaterial::new(SignatureScheme::MultiSig, vec![1u8; 32]),
            Err(WalletError::UnsupportedScheme(SignatureScheme::MultiSig))
        ));
        // the secp256k1 group order is not a valid scalar
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        let key = KeyMaterial::from_hex(SignatureScheme::Secp256k1, order).unwrap();
        assert!(matches!(key.signer(), Err(WalletError::InvalidKey { .. })));
    }

    #[test]
    fn keystore_format() {
        let mut flagged = vec![1u8];
        flagged.extend(hex::decode(SECRET).unwrap());
        let key: KeyMaterial = STANDARD.encode(&flagged).parse().unwrap();
        assert_eq!(key.scheme(), SignatureScheme::Secp256k1);

        flagged[0] = 7;
        assert!(matches!(
            KeyMaterial::from_base64(&STANDARD.encode(&flagged)),
            Err(WalletError::SignatureError(_))
        ));
    }

    #[test]
    fn deserializes_from_json() {
        let key: KeyMaterial = serde_json::from_value(serde_json::json!({
            "scheme": "Secp256r1",
            "secret": format!("0x{SECRET}"),
        }))
        .unwrap();
        assert_eq!(key.scheme(), SignatureScheme::Secp256r1);
    }
}
