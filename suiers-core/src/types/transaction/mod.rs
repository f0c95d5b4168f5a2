//! The Sui transaction data model and its canonical encoding.
//!
//! Every type here mirrors the on-chain definition field for field. The order of struct
//! fields and enum variants *is* the wire format, so it must not be changed.
mod programmable;
pub use programmable::{
    Argument, CallArg, Command, ObjectArg, ProgrammableMoveCall, ProgrammableTransaction,
};

mod builder;
pub use builder::{
    ProgrammableTransactionBuilder, SUI_SYSTEM_PACKAGE_ID, SUI_SYSTEM_STATE_OBJECT_ID,
    SUI_SYSTEM_STATE_OBJECT_SHARED_VERSION,
};

mod system;
pub use system::{ChangeEpoch, ConsensusCommitPrologue, RandomnessStateUpdate, SystemPackage};

pub mod request;

use super::{Digest, Intent, ObjectRef, SuiAddress, TransactionDigest};
use crate::{
    codec::{self, check_len, EncodingError, ProtocolLimits, ValidityCheck},
    utils::{blake2b256, hash_intent_message},
};
use serde::{Deserialize, Serialize, Serializer};

/// The transaction payload a sender signs.
///
/// Versioned so that the format can evolve; only `V1` exists today.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

/// Who pays for gas, with which coins, and how much at most.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

/// The last epoch in which the transaction may execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    #[default]
    None,
    Epoch(u64),
}

/// What the transaction does.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
    ChangeEpoch(ChangeEpoch),
    ConsensusCommitPrologue(ConsensusCommitPrologue),
    RandomnessStateUpdate(RandomnessStateUpdate),
}

impl TransactionKind {
    /// Variant index on the wire. Genesis (2) and the remaining system kinds are never
    /// signed by a client and have no variant here, hence the gaps.
    pub fn variant_index(&self) -> u32 {
        match self {
            TransactionKind::ProgrammableTransaction(_) => 0,
            TransactionKind::ChangeEpoch(_) => 1,
            TransactionKind::ConsensusCommitPrologue(_) => 3,
            TransactionKind::RandomnessStateUpdate(_) => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::ProgrammableTransaction(_) => "ProgrammableTransaction",
            TransactionKind::ChangeEpoch(_) => "ChangeEpoch",
            TransactionKind::ConsensusCommitPrologue(_) => "ConsensusCommitPrologue",
            TransactionKind::RandomnessStateUpdate(_) => "RandomnessStateUpdate",
        }
    }

    pub fn is_system_tx(&self) -> bool {
        !matches!(self, TransactionKind::ProgrammableTransaction(_))
    }
}

impl TransactionData {
    pub fn new(
        kind: TransactionKind,
        sender: SuiAddress,
        gas_data: GasData,
        expiration: TransactionExpiration,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 { kind, sender, gas_data, expiration })
    }

    pub fn kind(&self) -> &TransactionKind {
        match self {
            TransactionData::V1(inner) => &inner.kind,
        }
    }

    pub fn sender(&self) -> SuiAddress {
        match self {
            TransactionData::V1(inner) => inner.sender,
        }
    }

    pub fn gas_data(&self) -> &GasData {
        match self {
            TransactionData::V1(inner) => &inner.gas_data,
        }
    }

    pub fn expiration(&self) -> TransactionExpiration {
        match self {
            TransactionData::V1(inner) => inner.expiration,
        }
    }

    /// Gets the canonical encoding under the default protocol limits
    pub fn bcs(&self) -> Result<crate::types::Bytes, EncodingError> {
        codec::encode(self)
    }

    /// Gets the canonical encoding under the provided protocol limits
    pub fn bcs_with_limits(
        &self,
        limits: ProtocolLimits,
    ) -> Result<crate::types::Bytes, EncodingError> {
        codec::encode_with_limits(self, limits)
    }

    /// Hash of the intent message, the digest a sender's signature covers
    pub fn signing_digest(&self) -> Result<Digest, EncodingError> {
        Ok(hash_intent_message(Intent::sui_transaction(), self.bcs()?))
    }

    /// The transaction digest by which the network identifies this transaction:
    /// `Blake2b256("TransactionData::" || bcs)`.
    ///
    /// This is *not* the value that gets signed, see [`Intent`](crate::types::Intent).
    pub fn digest(&self) -> Result<TransactionDigest, EncodingError> {
        const SALT: &[u8] = b"TransactionData::";
        let encoded = self.bcs()?;
        let mut salted = Vec::with_capacity(SALT.len() + encoded.len());
        salted.extend_from_slice(SALT);
        salted.extend_from_slice(&encoded);
        Ok(TransactionDigest(blake2b256(salted)))
    }
}

/// Externally tagged like the derived impls, but with the sparse wire indices
impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        const NAME: &str = "TransactionKind";
        let (index, variant) = (self.variant_index(), self.name());
        match self {
            TransactionKind::ProgrammableTransaction(pt) => {
                s.serialize_newtype_variant(NAME, index, variant, pt)
            }
            TransactionKind::ChangeEpoch(tx) => {
                s.serialize_newtype_variant(NAME, index, variant, tx)
            }
            TransactionKind::ConsensusCommitPrologue(tx) => {
                s.serialize_newtype_variant(NAME, index, variant, tx)
            }
            TransactionKind::RandomnessStateUpdate(tx) => {
                s.serialize_newtype_variant(NAME, index, variant, tx)
            }
        }
    }
}

impl ValidityCheck for TransactionData {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        match self {
            TransactionData::V1(inner) => inner.validity_check(limits),
        }
    }
}

impl ValidityCheck for TransactionDataV1 {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        self.kind.validity_check(limits)?;
        self.gas_data.validity_check(limits)
    }
}

impl ValidityCheck for GasData {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        check_len("gas_payment", self.payment.len(), limits.max_gas_payment_objects)
    }
}

impl ValidityCheck for TransactionKind {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        match self {
            TransactionKind::ProgrammableTransaction(pt) => pt.validity_check(limits),
            // issued by validators, bounded only by the encoding itself
            TransactionKind::ChangeEpoch(_) |
            TransactionKind::ConsensusCommitPrologue(_) |
            TransactionKind::RandomnessStateUpdate(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectDigest, ObjectID};

    fn gas_data(budget: u64) -> GasData {
        GasData {
            payment: vec![ObjectRef::new(ObjectID([1u8; 32]), 7, ObjectDigest([2u8; 32]))],
            owner: SuiAddress([3u8; 32]),
            price: 1000,
            budget,
        }
    }

    fn prologue(epoch: u64) -> TransactionData {
        TransactionData::new(
            TransactionKind::ConsensusCommitPrologue(ConsensusCommitPrologue {
                epoch,
                round: 2,
                commit_timestamp_ms: 3,
            }),
            SuiAddress::ZERO,
            gas_data(5_000),
            TransactionExpiration::None,
        )
    }

    #[test]
    fn envelope_layout() {
        let encoded = prologue(1).bcs().unwrap();

        let mut expected = vec![0u8, 3];
        expected.extend(1u64.to_le_bytes());
        expected.extend(2u64.to_le_bytes());
        expected.extend(3u64.to_le_bytes());
        expected.extend([0u8; 32]);
        // gas data: one payment object
        expected.push(1);
        expected.extend([1u8; 32]);
        expected.extend(7u64.to_le_bytes());
        expected.push(32);
        expected.extend([2u8; 32]);
        expected.extend([3u8; 32]);
        expected.extend(1000u64.to_le_bytes());
        expected.extend(5000u64.to_le_bytes());
        // no expiration
        expected.push(0);

        assert_eq!(encoded.to_vec(), expected);
    }

    #[test]
    fn expiration_is_encoded() {
        let mut tx = prologue(1);
        let TransactionData::V1(inner) = &mut tx;
        inner.expiration = TransactionExpiration::Epoch(42);

        let encoded = tx.bcs().unwrap();
        assert_eq!(&encoded[encoded.len() - 9..], &[1, 42, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn gas_payment_limit() {
        let mut gas = gas_data(1);
        gas.payment = vec![gas.payment[0]; 257];
        let tx = TransactionData::new(
            prologue(1).kind().clone(),
            SuiAddress::ZERO,
            gas,
            TransactionExpiration::None,
        );
        assert_eq!(
            tx.bcs().unwrap_err(),
            EncodingError::SequenceTooLong { field: "gas_payment", len: 257, max: 256 }
        );
        assert!(tx.bcs_with_limits(ProtocolLimits::unbounded()).is_ok());
    }

    #[test]
    fn digest_depends_on_content() {
        let a = prologue(1).digest().unwrap();
        assert_eq!(a, prologue(1).digest().unwrap());
        assert_ne!(a, prologue(2).digest().unwrap());
    }

    #[test]
    fn signing_digest_covers_the_intent() {
        let tx = prologue(1);
        let mut preimage = vec![0u8, 0, 0];
        preimage.extend(tx.bcs().unwrap().to_vec());
        assert_eq!(tx.signing_digest().unwrap(), Digest(blake2b256(preimage)));
        assert_ne!(tx.signing_digest().unwrap().0, tx.digest().unwrap().0);
    }

    #[test]
    fn serde_roundtrip() {
        let tx = prologue(9);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["V1"]["kind"]["ConsensusCommitPrologue"]["epoch"], 9);
        assert_eq!(serde_json::from_value::<TransactionData>(json).unwrap(), tx);
    }

    #[test]
    fn kinds_use_sparse_wire_indices() {
        let randomness = TransactionKind::RandomnessStateUpdate(Default::default());
        assert_eq!(codec::encode(&randomness).unwrap()[0], 6);
        let change_epoch = TransactionKind::ChangeEpoch(Default::default());
        assert_eq!(codec::encode(&change_epoch).unwrap()[0], 1);
    }
}
