use super::{ObjectDigest, ObjectID};
use serde::{Deserialize, Serialize};

/// An object's version. Every transaction touching the object increments it.
pub type SequenceNumber = u64;

/// A reference to an object at a specific version: the unit of owned-object inputs and
/// gas payment.
///
/// On the wire this is the tuple `(id, version, digest)`: 32 + 8 + 1 + 32 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectID,
    pub version: SequenceNumber,
    pub digest: ObjectDigest,
}

impl ObjectRef {
    pub fn new(object_id: ObjectID, version: SequenceNumber, digest: ObjectDigest) -> Self {
        Self { object_id, version, digest }
    }
}

impl From<(ObjectID, SequenceNumber, ObjectDigest)> for ObjectRef {
    fn from((object_id, version, digest): (ObjectID, SequenceNumber, ObjectDigest)) -> Self {
        Self { object_id, version, digest }
    }
}
