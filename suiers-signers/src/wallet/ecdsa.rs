//! ECDSA signers. Both curves sign `SHA-256(digest)` with an RFC 6979 nonce and return the
//! compact `r || s` form, normalized to a low `s`.
use super::WalletError;
use crate::Signer;
use sha2::{Digest as _, Sha256};
use std::fmt;
use suiers_core::{
    k256::ecdsa::signature::DigestSigner,
    types::{Digest, PublicKey, SignatureScheme},
};

macro_rules! ecdsa_signer {
    ($(#[$outer:meta])* $name:ident, $curve:ident, $scheme:expr) => {
        $(#[$outer])*
        pub struct $name {
            signing_key: $curve::ecdsa::SigningKey,
            public_key: PublicKey,
        }

        impl $name {
            /// Instantiates the signer from a 32-byte big endian secret scalar
            pub fn from_bytes(secret: &[u8]) -> Result<Self, WalletError> {
                let signing_key = $curve::ecdsa::SigningKey::from_slice(secret)
                    .map_err(|_| WalletError::InvalidKey { scheme: $scheme, len: secret.len() })?;
                let point = signing_key.verifying_key().to_encoded_point(true);
                let public_key = PublicKey::new($scheme, point.as_bytes())?;
                Ok(Self { signing_key, public_key })
            }
        }

        impl Signer for $name {
            type Error = WalletError;

            fn scheme(&self) -> SignatureScheme {
                $scheme
            }

            fn public_key(&self) -> &PublicKey {
                &self.public_key
            }

            fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, Self::Error> {
                let signature: $curve::ecdsa::Signature =
                    self.signing_key.try_sign_digest(Sha256::new_with_prefix(digest))?;
                let signature = signature.normalize_s().unwrap_or(signature);
                Ok(signature.to_bytes().to_vec())
            }
        }

        // do not log the signing key
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).field("public_key", &self.public_key).finish()
            }
        }
    };
}

ecdsa_signer!(
    /// An ECDSA key pair over secp256k1
    Secp256k1Signer,
    k256,
    SignatureScheme::Secp256k1
);

ecdsa_signer!(
    /// An ECDSA key pair over secp256r1 (NIST P-256)
    Secp256r1Signer,
    p256,
    SignatureScheme::Secp256r1
);
