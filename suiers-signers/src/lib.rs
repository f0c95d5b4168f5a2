//! Provides a unified interface for locally signing Sui transactions.
//!
//! You can implement the `Signer` trait to extend functionality to other signers
//! such as Hardware Security Modules, KMS etc.
//!
//! Signers produce an [`AssembledSignature`]: the scheme flag, the raw signature and the
//! public key, which is all a validator needs to check it.
//!
//! Supported schemes:
//! - Ed25519
//! - ECDSA over secp256k1
//! - ECDSA over secp256r1
//!
//! ```no_run
//! # use suiers_core::types::{SignatureScheme, SuiAddress, TransactionRequest};
//! # use suiers_signers::{KeyMaterial, SigningInput, TransactionSigner};
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let key = KeyMaterial::from_hex(
//!     SignatureScheme::ED25519,
//!     "3d7d1e1f8e1b7fcb2d1d4b4a0d4ba4b3a8c4e7b3d7f1e3c2a1b0c9d8e7f6a5b4",
//! )?;
//! let sender = key.signer()?.address();
//!
//! // create a transaction
//! let tx = TransactionRequest::pay_all_sui("0x2".parse::<SuiAddress>()?)
//!     .sender(sender)
//!     .gas_price(1000)
//!     .gas_budget(3_000_000);
//!
//! // sign it
//! let output = TransactionSigner::new().sign(SigningInput::new(tx).with_key(key))?;
//! println!("{} {}", output.unsigned_tx_base64(), output.signature);
//! # Ok(())
//! # }
//! ```
mod key;
pub use key::KeyMaterial;

mod wallet;
pub use wallet::{Ed25519Signer, Secp256k1Signer, Secp256r1Signer, WalletError};

mod signer;
pub use signer::{PreSigningOutput, SigningError, SigningInput, SigningOutput, TransactionSigner};

use suiers_core::{
    codec::EncodingError,
    types::{
        AssembledSignature, Digest, Intent, PublicKey, SignatureError, SignatureScheme,
        SuiAddress, TransactionRequest,
    },
    utils::{hash_intent_message, hash_personal_message},
};
use std::error::Error;

/// Trait for signing transactions and messages
///
/// Implement this trait to support different signing modes, e.g. Ledger, hosted etc.
/// Signing is synchronous: the digest is all a signer needs.
pub trait Signer: std::fmt::Debug + Send + Sync {
    type Error: Error + Send + Sync + From<EncodingError> + From<SignatureError>;

    /// Returns the scheme the signer signs under
    fn scheme(&self) -> SignatureScheme;

    /// Returns the signer's public key
    fn public_key(&self) -> &PublicKey;

    /// Signs a 32-byte signing digest, returning the raw signature
    fn sign_digest(&self, digest: &Digest) -> Result<Vec<u8>, Self::Error>;

    /// Returns the signer's Sui address
    fn address(&self) -> SuiAddress {
        self.public_key().to_sui_address()
    }

    /// Signs a digest, packing the signature with the signer's public key
    fn sign_hash(&self, digest: &Digest) -> Result<AssembledSignature, Self::Error> {
        let signature = self.sign_digest(digest)?;
        Ok(AssembledSignature::assemble(&signature, self.public_key())?)
    }

    /// Signs the transaction
    fn sign_transaction(&self, tx: &TransactionRequest) -> Result<AssembledSignature, Self::Error> {
        let encoded = tx.encode()?;
        self.sign_hash(&hash_intent_message(Intent::sui_transaction(), encoded))
    }

    /// Signs an off-chain message under the personal message intent
    fn sign_personal_message(&self, message: &[u8]) -> Result<AssembledSignature, Self::Error> {
        self.sign_hash(&hash_personal_message(message)?)
    }
}
