use super::WalletError;
use crate::Signer;
use ed25519_dalek::{Signer as _, SigningKey};
use std::fmt;
use suiers_core::types::{Digest, PublicKey, SignatureScheme};

/// An Ed25519 key pair. Signing is deterministic and over the digest itself.
pub struct Ed25519Signer {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl Ed25519Signer {
    /// Instantiates the signer from a 32-byte secret seed
    pub fn from_bytes(secret: &[u8]) -> Result<Self, WalletError> {
        let seed: &[u8; 32] = secret.try_into().map_err(|_| WalletError::InvalidKey {
            scheme: SignatureScheme::ED25519,
            len: secret.len(),
        })?;
        let signing_key = SigningKey::from_bytes(seed);
        let public_key =
            PublicKey::new(SignatureScheme::ED25519, signing_key.verifying_key().to_bytes())?;
        Ok(Self { signing_key, public_key })
    }
}

impl Signer for Ed25519Signer {
    type Error = WalletError;

    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::ED25519
    }

    fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, Self::Error> {
        Ok(self.signing_key.sign(digest.as_ref()).to_bytes().to_vec())
    }
}

// do not log the signing key
impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer").field("public_key", &self.public_key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 8032, TEST 1
    const SECRET: [u8; 32] =
        hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    const PUBLIC: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

    #[test]
    fn derives_public_key() {
        let signer = Ed25519Signer::from_bytes(&SECRET).unwrap();
        assert_eq!(signer.public_key().as_bytes(), &PUBLIC);
        assert_eq!(signer.address(), signer.public_key().to_sui_address());
    }

    #[test]
    fn signs_deterministically() {
        let signer = Ed25519Signer::from_bytes(&SECRET).unwrap();
        let digest = Digest([5u8; 32]);
        let first = signer.sign_digest(&digest).unwrap();
        assert_eq!(first.len(), 64);
        assert_eq!(first, signer.sign_digest(&digest).unwrap());
        assert!(signer.public_key().verify(&digest, &first).is_ok());
    }

    #[test]
    fn rejects_short_seed() {
        assert!(matches!(
            Ed25519Signer::from_bytes(&SECRET[..31]),
            Err(WalletError::InvalidKey { scheme: SignatureScheme::ED25519, len: 31 })
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let signer = Ed25519Signer::from_bytes(&SECRET).unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains(&hex::encode(SECRET)));
    }
}
