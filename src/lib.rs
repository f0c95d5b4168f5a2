#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # suiers
//!
//! > Canonical encoding and local signing of Sui transactions.
//!
//! # Quickstart
//!
//! A prelude is provided which imports all the important things for you. Build a
//! [`TransactionRequest`](types::TransactionRequest), hand it to a
//! [`TransactionSigner`](signers::TransactionSigner) together with a key, and submit the
//! returned transaction bytes and signature to a fullnode.
//!
//! ```no_run
//! use suiers::prelude::*;
//!
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let key: KeyMaterial = "AOTJPJ1jR3r+DnjF0oyg4bE8Ct5p7A1dGwmlIsYVB7/8".parse()?;
//! let sender = key.signer()?.address();
//!
//! let tx = TransactionRequest::pay_sui(vec!["0x2".parse()?], vec![1_000])
//!     .sender(sender)
//!     .gas_price(1_000)
//!     .gas_budget(3_000_000);
//!
//! let signer = TransactionSigner::new();
//! // the digest external co-signers sign
//! let hashes = signer.pre_image_hashes(&SigningInput::new(tx.clone()))?;
//! println!("digest: {}", hashes.data_hash);
//!
//! let output = signer.sign(SigningInput::new(tx).with_key(key))?;
//! println!("tx_bytes: {}", output.unsigned_tx_base64());
//! println!("signature: {}", output.signature_base64());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`types`]: addresses, digests, objects, Move types, transactions, keys and signatures
//! - [`codec`]: the BCS encoder and the protocol limits it enforces
//! - [`utils`]: Blake2b-256 and intent message hashing
//! - [`signers`]: per-scheme signers and the signing pipeline

/// # Sui types
///
/// The transaction model, from identifiers up to `TransactionData`, plus the public keys and
/// assembled signatures that travel with a transaction.
pub mod types {
    pub use suiers_core::types::*;
}

/// # Canonical encoding
///
/// Every type which reaches the wire is serialized with `bcs` after a
/// [`ValidityCheck`](codec::ValidityCheck) against [`ProtocolLimits`](codec::ProtocolLimits),
/// so a transaction the network would reject fails here, before anything is signed.
pub mod codec {
    pub use suiers_core::codec::*;
}

/// Hashing utilities
pub mod utils {
    pub use suiers_core::utils::*;
}

/// # suiers-signers
///
/// Provides a unified interface for locally signing transactions. You can implement the
/// `Signer` trait to extend functionality to other signers such as Hardware Security Modules,
/// KMS etc.
pub mod signers {
    pub use suiers_signers::*;
}

/// Easy imports of frequently used type definitions and traits
pub mod prelude {
    pub use super::{codec::*, signers::*, types::*, utils::*};
}
