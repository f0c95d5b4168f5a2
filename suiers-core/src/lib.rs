#![cfg_attr(docsrs, feature(doc_cfg))]
//! Sui types, canonical encoding and signature assembly.
//! _It is recommended to use the `types`, `codec` and `utils` re-exports of the `suiers`
//! crate instead of depending on this crate directly._
//!
//! This library provides the transaction data model of the Sui network along with
//! everything needed to turn it into the exact bytes that validators hash and verify.
//!
//! ## Hashing a transaction for signing
//!
//! Signing on Sui is done by first prefixing the BCS-encoded transaction with a 3-byte
//! [`Intent`](types::Intent) and then signing the Blake2b-256 hash of the result.
//!
//! ```rust
//! use suiers_core::{
//!     types::{Intent, SuiAddress, TransactionRequest},
//!     utils::hash_intent_message,
//! };
//!
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let sender: SuiAddress = "0x1".parse()?;
//! let tx = TransactionRequest::pay_all_sui(sender)
//!     .sender(sender)
//!     .gas_price(1000)
//!     .gas_budget(3_000_000)
//!     .transaction_data()?;
//!
//! let encoded = suiers_core::codec::encode(&tx)?;
//! let digest = hash_intent_message(Intent::sui_transaction(), &encoded);
//! assert_eq!(digest.as_ref().len(), 32);
//! # Ok(())
//! # }
//! ```
pub mod types;

/// Canonical (BCS) encoding of the data model
pub mod codec;

/// Various utilities
pub mod utils;

// re-export the curve crates to avoid version mismatches downstream
pub use ed25519_dalek;
pub use k256;
pub use p256;
