use crate::{KeyMaterial, WalletError};
use serde::{Deserialize, Serialize, Serializer};
use suiers_core::{
    codec::{EncodingError, ProtocolLimits},
    types::{
        AssembledSignature, Bytes, Digest, Intent, SignatureError, SignatureScheme,
        TransactionRequest,
    },
    utils::{blake2b256, hash_personal_message, intent_message},
};
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// A transaction to sign and, for [`TransactionSigner::sign`], the key to sign it with
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningInput {
    pub transaction: TransactionRequest,
    #[serde(default)]
    pub private_key: Option<KeyMaterial>,
}

impl SigningInput {
    /// An input without a key, enough to compute the preimage and its digest
    pub fn new(transaction: TransactionRequest) -> Self {
        Self { transaction, private_key: None }
    }

    #[must_use]
    pub fn with_key(mut self, key: KeyMaterial) -> Self {
        self.private_key = Some(key);
        self
    }
}

/// The digest to sign and the intent message it was hashed from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSigningOutput {
    pub data_hash: Digest,
    pub data: Bytes,
}

/// A signed transaction, ready to be submitted as `(tx_bytes, [signature])`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningOutput {
    /// The canonically encoded transaction, without the intent header
    #[serde(serialize_with = "serialize_base64")]
    pub unsigned_tx: Bytes,
    pub signature: AssembledSignature,
}

impl SigningOutput {
    pub fn unsigned_tx_base64(&self) -> String {
        self.unsigned_tx.to_base64()
    }

    pub fn signature_base64(&self) -> String {
        self.signature.to_base64()
    }

    /// Checks the signature against the digest of `unsigned_tx`
    pub fn verify(&self) -> Result<(), SignatureError> {
        let preimage = intent_message(Intent::sui_transaction(), &self.unsigned_tx);
        let digest = Digest(blake2b256(preimage));
        self.signature.verify(&digest)
    }
}

fn serialize_base64<S: Serializer>(bytes: &Bytes, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&bytes.to_base64())
}

#[derive(Error, Debug)]
/// Error thrown while producing a preimage, digest or signature. The first failing stage
/// wins and nothing is signed after an error.
pub enum SigningError {
    /// The transaction could not be encoded
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// No key, or key bytes which are not a valid key of their scheme
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
    /// A scheme flag which cannot sign with a single key
    #[error("unsupported signature scheme flag {0}")]
    UnsupportedScheme(u8),
    #[error("{scheme} signatures are {expected} bytes, got {got}")]
    SchemeMismatch { scheme: SignatureScheme, expected: usize, got: usize },
    #[error("malformed {scheme} public key ({len} bytes)")]
    MalformedPublicKey { scheme: SignatureScheme, len: usize },
    #[error(transparent)]
    Signature(SignatureError),
}

impl From<SignatureError> for SigningError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::UnknownScheme(flag) => Self::UnsupportedScheme(flag),
            SignatureError::UnsupportedScheme(scheme) => Self::UnsupportedScheme(scheme.flag()),
            SignatureError::SchemeMismatch { scheme, expected, got } => {
                Self::SchemeMismatch { scheme, expected, got }
            }
            SignatureError::MalformedPublicKey { scheme, len } => {
                Self::MalformedPublicKey { scheme, len }
            }
            err => Self::Signature(err),
        }
    }
}

impl From<WalletError> for SigningError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::UnsupportedScheme(scheme) => Self::UnsupportedScheme(scheme.flag()),
            WalletError::SignatureError(err) => err.into(),
            WalletError::EncodingError(err) => Self::Encoding(err),
            err @ (WalletError::InvalidKey { .. } |
            WalletError::CryptoError(_) |
            WalletError::HexError(_) |
            WalletError::Base64Error(_)) => Self::InvalidKeyMaterial(err.to_string()),
        }
    }
}

/// Runs the signing pipeline: encode, frame with the intent, hash, sign, assemble.
///
/// The signer holds no state besides its encoding limits, so a single instance can be
/// shared between threads and every call is independent of the previous ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionSigner {
    limits: ProtocolLimits,
}

impl TransactionSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ProtocolLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ProtocolLimits {
        &self.limits
    }

    /// Returns `intent || bcs(transaction)`, the message external co-signers hash and sign
    #[instrument(skip_all, err)]
    pub fn transaction_preimage(&self, input: &SigningInput) -> Result<Bytes, SigningError> {
        let encoded = input.transaction.encode_with_limits(self.limits)?;
        let preimage = intent_message(Intent::sui_transaction(), &encoded);
        debug!(len = preimage.len(), "encoded transaction preimage");
        trace!(preimage = %hex::encode(&preimage));
        Ok(preimage.into())
    }

    /// Returns the digest to sign, with the preimage it was computed from
    #[instrument(skip_all, err)]
    pub fn pre_image_hashes(&self, input: &SigningInput) -> Result<PreSigningOutput, SigningError> {
        let data = self.transaction_preimage(input)?;
        let data_hash = Digest(blake2b256(&data));
        debug!(digest = %data_hash, "hashed transaction preimage");
        Ok(PreSigningOutput { data_hash, data })
    }

    /// Signs the transaction with the input's key. The key is consumed and wiped before
    /// this returns, whatever the outcome.
    #[instrument(skip_all, err)]
    pub fn sign(&self, input: SigningInput) -> Result<SigningOutput, SigningError> {
        let SigningInput { transaction, private_key } = input;
        let unsigned_tx = transaction.encode_with_limits(self.limits)?;
        let preimage = intent_message(Intent::sui_transaction(), &unsigned_tx);
        let digest = Digest(blake2b256(&preimage));
        debug!(len = unsigned_tx.len(), digest = %digest, "hashed transaction");

        let key = private_key
            .ok_or_else(|| SigningError::InvalidKeyMaterial("no private key supplied".into()))?;
        let signature = sign_with(key, &digest)?;
        Ok(SigningOutput { unsigned_tx, signature })
    }

    /// Signs an off-chain message under the personal message intent
    #[instrument(skip_all, err)]
    pub fn sign_personal_message(
        &self,
        message: &[u8],
        key: KeyMaterial,
    ) -> Result<AssembledSignature, SigningError> {
        let digest = hash_personal_message(message)?;
        debug!(len = message.len(), digest = %digest, "hashed personal message");
        sign_with(key, &digest)
    }
}

fn sign_with(key: KeyMaterial, digest: &Digest) -> Result<AssembledSignature, SigningError> {
    let signer = key.signer()?;
    drop(key);
    debug!(scheme = %signer.scheme(), address = %signer.address(), "signing digest");
    Ok(signer.sign_hash(digest)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use suiers_core::types::{ObjectDigest, ObjectID, ObjectRef, SuiAddress};

    const SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    fn request(sender: SuiAddress) -> TransactionRequest {
        let gas = ObjectRef::new(ObjectID([7u8; 32]), 3, ObjectDigest([9u8; 32]));
        TransactionRequest::pay_all_sui(SuiAddress::from([2u8; 32]))
            .sender(sender)
            .gas_payment([gas])
            .gas_price(1_000)
            .gas_budget(5_000_000)
    }

    fn key(scheme: SignatureScheme) -> KeyMaterial {
        KeyMaterial::from_hex(scheme, SECRET).unwrap()
    }

    #[test]
    fn preimage_starts_with_intent() {
        let signer = TransactionSigner::new();
        let input = SigningInput::new(request(SuiAddress::from([1u8; 32])));
        let preimage = signer.transaction_preimage(&input).unwrap();
        assert_eq!(&preimage[..3], &[0, 0, 0]);
        assert_eq!(&preimage[3..], &input.transaction.encode().unwrap()[..]);
    }

    #[test]
    fn digest_is_hash_of_preimage() {
        let signer = TransactionSigner::new();
        let input = SigningInput::new(request(SuiAddress::from([1u8; 32])));
        let out = signer.pre_image_hashes(&input).unwrap();
        assert_eq!(out.data, signer.transaction_preimage(&input).unwrap());
        assert_eq!(out.data_hash, Digest(blake2b256(&out.data)));
    }

    #[test]
    fn signs_with_each_scheme() {
        let signer = TransactionSigner::new();
        for scheme in
            [SignatureScheme::ED25519, SignatureScheme::Secp256k1, SignatureScheme::Secp256r1]
        {
            let sender = key(scheme).signer().unwrap().address();
            let input = SigningInput::new(request(sender));
            let digest = signer.pre_image_hashes(&input).unwrap().data_hash;

            let out = signer.sign(input.with_key(key(scheme))).unwrap();
            assert_eq!(out.signature.scheme(), scheme);
            assert_eq!(out.signature.public_key().to_sui_address(), sender);
            assert!(out.signature.verify(&digest).is_ok());
            assert!(out.verify().is_ok());
        }
    }

    #[test]
    fn sign_requires_a_key() {
        let input = SigningInput::new(request(SuiAddress::from([1u8; 32])));
        assert!(matches!(
            TransactionSigner::new().sign(input),
            Err(SigningError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn encoding_errors_come_first() {
        // no sender and no key: the encoder is the first stage to fail
        let input = SigningInput::new(TransactionRequest::pay_all_sui(SuiAddress::ZERO));
        assert!(matches!(
            TransactionSigner::new().sign(input),
            Err(SigningError::Encoding(EncodingError::MissingField("sender")))
        ));
    }

    #[test]
    fn invalid_key_is_reported() {
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        let key = KeyMaterial::from_hex(SignatureScheme::Secp256k1, order).unwrap();
        let input = SigningInput::new(request(SuiAddress::from([1u8; 32]))).with_key(key);
        let err = TransactionSigner::new().sign(input).unwrap_err();
        assert!(matches!(err, SigningError::InvalidKeyMaterial(_)));
        assert!(!err.to_string().contains(order));
    }

    #[test]
    fn maps_signature_errors() {
        assert!(matches!(
            SigningError::from(SignatureError::UnknownScheme(9)),
            SigningError::UnsupportedScheme(9)
        ));
        assert!(matches!(
            SigningError::from(WalletError::UnsupportedScheme(SignatureScheme::MultiSig)),
            SigningError::UnsupportedScheme(3)
        ));
        assert!(matches!(
            SigningError::from(SignatureError::SchemeMismatch {
                scheme: SignatureScheme::ED25519,
                expected: 64,
                got: 65
            }),
            SigningError::SchemeMismatch { got: 65, .. }
        ));
    }

    #[test]
    fn personal_message_signature_verifies() {
        let signer = TransactionSigner::new();
        let signature =
            signer.sign_personal_message(b"hello", key(SignatureScheme::ED25519)).unwrap();
        let digest = hash_personal_message(b"hello").unwrap();
        assert!(signature.verify(&digest).is_ok());
        assert!(signature.verify(&hash_personal_message(b"hellO").unwrap()).is_err());
    }

    #[test]
    fn input_from_json() {
        let input: SigningInput = serde_json::from_value(serde_json::json!({
            "transaction": serde_json::to_value(request(SuiAddress::from([1u8; 32]))).unwrap(),
            "privateKey": { "scheme": "ED25519", "secret": SECRET },
        }))
        .unwrap();
        let scheme = input.private_key.as_ref().map(KeyMaterial::scheme);
        assert_eq!(scheme, Some(SignatureScheme::ED25519));

        let out = TransactionSigner::new().sign(input).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["unsignedTx"], out.unsigned_tx_base64());
        assert_eq!(json["signature"], out.signature_base64());
    }
}
