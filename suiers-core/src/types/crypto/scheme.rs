use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The signature schemes known to Sui, by the flag byte which identifies them on the wire.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum SignatureScheme {
    ED25519 = 0,
    Secp256k1 = 1,
    Secp256r1 = 2,
    /// An aggregate of other signatures. Never produced by signing a digest.
    MultiSig = 3,
}

impl SignatureScheme {
    pub fn flag(self) -> u8 {
        self.into()
    }

    /// Width of a public key, compressed for the ECDSA curves. `None` for multisig, whose
    /// keys are of variable size.
    pub const fn public_key_length(self) -> Option<usize> {
        match self {
            SignatureScheme::ED25519 => Some(32),
            SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => Some(33),
            SignatureScheme::MultiSig => None,
        }
    }

    /// Width of a raw signature, `r || s` for the ECDSA curves
    pub const fn signature_length(self) -> Option<usize> {
        match self {
            SignatureScheme::ED25519 | SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => {
                Some(64)
            }
            SignatureScheme::MultiSig => None,
        }
    }

    /// Whether a single key signs under this scheme
    pub const fn is_single_key(self) -> bool {
        !matches!(self, SignatureScheme::MultiSig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(SignatureScheme::ED25519.flag(), 0);
        assert_eq!(SignatureScheme::Secp256k1.flag(), 1);
        assert_eq!(SignatureScheme::Secp256r1.flag(), 2);
        assert_eq!(SignatureScheme::MultiSig.flag(), 3);
        assert_eq!(SignatureScheme::try_from(2u8).unwrap(), SignatureScheme::Secp256r1);
        assert!(SignatureScheme::try_from(4u8).is_err());
    }

    #[test]
    fn names() {
        assert_eq!(SignatureScheme::Secp256k1.to_string(), "Secp256k1");
        assert_eq!("ED25519".parse::<SignatureScheme>().unwrap(), SignatureScheme::ED25519);
        assert_eq!(SignatureScheme::MultiSig.public_key_length(), None);
    }
}
