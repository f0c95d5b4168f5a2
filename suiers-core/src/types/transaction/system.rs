//! Transactions issued by the validators themselves rather than by users.
use crate::types::{Bytes, ObjectID, SequenceNumber};
use serde::{Deserialize, Serialize};

/// A framework package written at an epoch change: `(version, modules, dependencies)`
pub type SystemPackage = (SequenceNumber, Vec<Bytes>, Vec<ObjectID>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEpoch {
    /// The next (to become) epoch
    pub epoch: u64,
    pub protocol_version: u64,
    pub storage_charge: u64,
    pub computation_charge: u64,
    pub storage_rebate: u64,
    pub non_refundable_storage_fee: u64,
    pub epoch_start_timestamp_ms: u64,
    pub system_packages: Vec<SystemPackage>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusCommitPrologue {
    pub epoch: u64,
    pub round: u64,
    pub commit_timestamp_ms: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomnessStateUpdate {
    pub epoch: u64,
    pub randomness_round: u64,
    pub random_bytes: Bytes,
    pub randomness_obj_initial_shared_version: SequenceNumber,
}
