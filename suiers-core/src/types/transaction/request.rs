//! Transaction requests
use super::{
    GasData, ProgrammableTransaction, ProgrammableTransactionBuilder, TransactionData,
    TransactionExpiration, TransactionKind,
};
use crate::{
    codec::{EncodingError, ProtocolLimits},
    types::{Bytes, ObjectRef, SuiAddress},
};
use serde::{Deserialize, Serialize};

/// What a [`TransactionRequest`] asks the network to do
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionPayload {
    /// A caller-built programmable transaction, used verbatim
    Programmable(ProgrammableTransaction),
    /// Any other transaction kind, used verbatim
    System(TransactionKind),
    /// Sends the whole gas coin to `recipient`
    #[serde(rename_all = "camelCase")]
    PayAllSui { recipient: SuiAddress },
    /// Splits the gas coin, paying `amounts[i]` to `recipients[i]`
    #[serde(rename_all = "camelCase")]
    PaySui { recipients: Vec<SuiAddress>, amounts: Vec<u64> },
    /// Merges `input_coins`, then splits the result as `PaySui` does
    #[serde(rename_all = "camelCase")]
    Pay { input_coins: Vec<ObjectRef>, recipients: Vec<SuiAddress>, amounts: Vec<u64> },
    #[serde(rename_all = "camelCase")]
    TransferObject { object: ObjectRef, recipient: SuiAddress },
    /// Stakes `coins` (or `amount` out of them) with `validator`
    #[serde(rename_all = "camelCase")]
    AddStake { coins: Vec<ObjectRef>, amount: Option<u64>, validator: SuiAddress },
    #[serde(rename_all = "camelCase")]
    WithdrawStake { staked_sui: ObjectRef },
    /// An already encoded `TransactionData`, e.g. received from a co-signer
    Encoded(Bytes),
}

impl From<ProgrammableTransaction> for TransactionPayload {
    fn from(pt: ProgrammableTransaction) -> Self {
        TransactionPayload::Programmable(pt)
    }
}

impl From<TransactionKind> for TransactionPayload {
    fn from(kind: TransactionKind) -> Self {
        TransactionPayload::System(kind)
    }
}

impl TransactionPayload {
    /// Lowers the payload into the transaction kind it describes
    pub fn to_kind(&self) -> Result<TransactionKind, EncodingError> {
        let mut builder = ProgrammableTransactionBuilder::new();
        match self {
            TransactionPayload::Programmable(pt) => {
                return Ok(TransactionKind::ProgrammableTransaction(pt.clone()))
            }
            TransactionPayload::System(kind) => return Ok(kind.clone()),
            TransactionPayload::Encoded(_) => return Err(EncodingError::AlreadyEncoded),
            TransactionPayload::PayAllSui { recipient } => builder.pay_all_sui(*recipient)?,
            TransactionPayload::PaySui { recipients, amounts } => {
                builder.pay_sui(recipients.clone(), amounts.clone())?
            }
            TransactionPayload::Pay { input_coins, recipients, amounts } => {
                builder.pay(input_coins.clone(), recipients.clone(), amounts.clone())?
            }
            TransactionPayload::TransferObject { object, recipient } => {
                builder.transfer_object(*recipient, *object)?
            }
            TransactionPayload::AddStake { coins, amount, validator } => {
                builder.add_stake(coins.clone(), *amount, *validator)?
            }
            TransactionPayload::WithdrawStake { staked_sui } => {
                builder.withdraw_stake(*staked_sui)?
            }
        }
        Ok(TransactionKind::ProgrammableTransaction(builder.finish()))
    }
}

/// Parameters for signing a transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<SuiAddress>,

    /// Coins paying for gas (empty when they are picked later, e.g. by a sponsor)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gas_payment: Vec<ObjectRef>,

    /// Owner of the gas coins (None for the sender)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_owner: Option<SuiAddress>,

    /// Gas price, in MIST per gas unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,

    /// Maximum amount of MIST spent on gas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,

    #[serde(default)]
    pub expiration: TransactionExpiration,

    pub payload: TransactionPayload,
}

impl TransactionRequest {
    /// Creates a request for `payload` with all other fields left empty
    pub fn new<T: Into<TransactionPayload>>(payload: T) -> Self {
        TransactionRequest {
            sender: None,
            gas_payment: Vec::new(),
            gas_owner: None,
            gas_price: None,
            gas_budget: None,
            expiration: TransactionExpiration::None,
            payload: payload.into(),
        }
    }

    /// Convenience function for sending the whole gas coin to the recipient
    pub fn pay_all_sui(recipient: SuiAddress) -> Self {
        Self::new(TransactionPayload::PayAllSui { recipient })
    }

    /// Convenience function for paying several recipients out of the gas coin
    pub fn pay_sui(recipients: Vec<SuiAddress>, amounts: Vec<u64>) -> Self {
        Self::new(TransactionPayload::PaySui { recipients, amounts })
    }

    /// Convenience function for paying several recipients out of `input_coins`
    pub fn pay(
        input_coins: Vec<ObjectRef>,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
    ) -> Self {
        Self::new(TransactionPayload::Pay { input_coins, recipients, amounts })
    }

    pub fn transfer_object(object: ObjectRef, recipient: SuiAddress) -> Self {
        Self::new(TransactionPayload::TransferObject { object, recipient })
    }

    pub fn add_stake(coins: Vec<ObjectRef>, amount: Option<u64>, validator: SuiAddress) -> Self {
        Self::new(TransactionPayload::AddStake { coins, amount, validator })
    }

    pub fn withdraw_stake(staked_sui: ObjectRef) -> Self {
        Self::new(TransactionPayload::WithdrawStake { staked_sui })
    }

    /// A request for already encoded `TransactionData` bytes
    pub fn encoded<T: Into<Bytes>>(bytes: T) -> Self {
        Self::new(TransactionPayload::Encoded(bytes.into()))
    }

    /// A request for base64 encoded `TransactionData` bytes, as exchanged between wallets
    pub fn from_base64(encoded: &str) -> Result<Self, EncodingError> {
        Ok(Self::encoded(Bytes::from_base64(encoded)?))
    }

    // Builder pattern helpers

    /// Sets the `sender` field in the transaction to the provided value
    #[must_use]
    pub fn sender<T: Into<SuiAddress>>(mut self, sender: T) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the `gas_payment` field in the transaction to the provided value
    #[must_use]
    pub fn gas_payment<T: IntoIterator<Item = ObjectRef>>(mut self, coins: T) -> Self {
        self.gas_payment = coins.into_iter().collect();
        self
    }

    /// Sets the `gas_owner` field in the transaction to the provided value
    #[must_use]
    pub fn gas_owner<T: Into<SuiAddress>>(mut self, owner: T) -> Self {
        self.gas_owner = Some(owner.into());
        self
    }

    /// Sets the `gas_price` field in the transaction to the provided value
    #[must_use]
    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Sets the `gas_budget` field in the transaction to the provided value
    #[must_use]
    pub fn gas_budget(mut self, gas_budget: u64) -> Self {
        self.gas_budget = Some(gas_budget);
        self
    }

    /// Sets the `expiration` field in the transaction to the provided value
    #[must_use]
    pub fn expiration(mut self, expiration: TransactionExpiration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Lowers the request into the transaction data it describes.
    ///
    /// Fails for [`TransactionPayload::Encoded`] requests, whose data is only available as
    /// bytes.
    pub fn transaction_data(&self) -> Result<TransactionData, EncodingError> {
        let sender = self.sender.ok_or(EncodingError::MissingField("sender"))?;
        let price = self.gas_price.ok_or(EncodingError::MissingField("gas_price"))?;
        let budget = self.gas_budget.ok_or(EncodingError::MissingField("gas_budget"))?;
        let kind = self.payload.to_kind()?;

        let gas_data = GasData {
            payment: self.gas_payment.clone(),
            owner: self.gas_owner.unwrap_or(sender),
            price,
            budget,
        };
        Ok(TransactionData::new(kind, sender, gas_data, self.expiration))
    }

    /// Gets the canonical encoding of the transaction under the default protocol limits
    pub fn encode(&self) -> Result<Bytes, EncodingError> {
        self.encode_with_limits(ProtocolLimits::default())
    }

    /// Gets the canonical encoding of the transaction under the provided protocol limits.
    /// Pre-encoded bytes are returned as they are.
    pub fn encode_with_limits(&self, limits: ProtocolLimits) -> Result<Bytes, EncodingError> {
        match &self.payload {
            TransactionPayload::Encoded(bytes) if bytes.is_empty() => {
                Err(EncodingError::EmptyPayload)
            }
            TransactionPayload::Encoded(bytes) => Ok(bytes.clone()),
            _ => self.transaction_data()?.bcs_with_limits(limits),
        }
    }
}
