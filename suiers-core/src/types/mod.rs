mod address;
pub use address::{ObjectID, ParseAddressError, SuiAddress};

mod bytes;
pub use self::bytes::Bytes;

mod digest;
pub use digest::{Digest, ObjectDigest, ParseDigestError, TransactionDigest};

mod object;
pub use object::{ObjectRef, SequenceNumber};

mod move_type;
pub use move_type::{Identifier, ParseTypeTagError, StructTag, TypeTag};

mod intent;
pub use intent::{AppId, Intent, IntentScope, IntentVersion, InvalidIntent};

pub mod transaction;
pub use transaction::{
    request::{TransactionPayload, TransactionRequest},
    Argument, CallArg, ChangeEpoch, Command, ConsensusCommitPrologue, GasData, ObjectArg,
    ProgrammableMoveCall, ProgrammableTransaction, ProgrammableTransactionBuilder,
    RandomnessStateUpdate, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind,
};

pub mod crypto;
pub use crypto::{AssembledSignature, PublicKey, SignatureError, SignatureScheme};
