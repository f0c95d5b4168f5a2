use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// What a signed payload is meant to be.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
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
pub enum IntentScope {
    TransactionData = 0,
    TransactionEffects = 1,
    CheckpointSummary = 2,
    PersonalMessage = 3,
    SenderSignedTransaction = 4,
    ProofOfPossession = 5,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum IntentVersion {
    V0 = 0,
}

/// The application a signature is intended for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
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
pub enum AppId {
    Sui = 0,
    Narwhal = 1,
    Consensus = 2,
}

/// The 3-byte domain separator prepended to every payload before hashing, so that a
/// signature over one kind of message can never be replayed as another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub scope: IntentScope,
    pub version: IntentVersion,
    pub app_id: AppId,
}

impl Intent {
    /// The intent every user transaction is signed under: `[0, 0, 0]`
    pub const fn sui_transaction() -> Self {
        Self { scope: IntentScope::TransactionData, version: IntentVersion::V0, app_id: AppId::Sui }
    }

    /// The intent for signing arbitrary off-chain messages: `[3, 0, 0]`
    pub const fn personal_message() -> Self {
        Self { scope: IntentScope::PersonalMessage, version: IntentVersion::V0, app_id: AppId::Sui }
    }

    pub const fn with_scope(mut self, scope: IntentScope) -> Self {
        self.scope = scope;
        self
    }

    pub const fn with_app_id(mut self, app_id: AppId) -> Self {
        self.app_id = app_id;
        self
    }

    /// The wire form: `[scope, version, app_id]`
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.scope.into(), self.version.into(), self.app_id.into()]
    }
}

impl From<Intent> for [u8; 3] {
    fn from(intent: Intent) -> Self {
        intent.to_bytes()
    }
}

/// An intent header with an unknown scope, version or app id byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid intent header {0:?}")]
pub struct InvalidIntent(pub [u8; 3]);

impl TryFrom<[u8; 3]> for Intent {
    type Error = InvalidIntent;

    fn try_from(header: [u8; 3]) -> Result<Self, Self::Error> {
        let [scope, version, app_id] = header;
        Ok(Self {
            scope: IntentScope::try_from(scope).map_err(|_| InvalidIntent(header))?,
            version: IntentVersion::try_from(version).map_err(|_| InvalidIntent(header))?,
            app_id: AppId::try_from(app_id).map_err(|_| InvalidIntent(header))?,
        })
    }
}
