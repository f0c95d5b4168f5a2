use super::{Argument, CallArg, Command, ObjectArg, ProgrammableTransaction};
use crate::{
    codec::{index_u16, to_bcs, EncodingError},
    types::{Identifier, ObjectID, ObjectRef, SequenceNumber, SuiAddress, TypeTag},
};
use serde::Serialize;
use std::collections::HashMap;

/// The package holding the Sui system module
pub const SUI_SYSTEM_PACKAGE_ID: ObjectID = ObjectID::from_u64(3);
/// The shared object holding the system state
pub const SUI_SYSTEM_STATE_OBJECT_ID: ObjectID = ObjectID::from_u64(5);
pub const SUI_SYSTEM_STATE_OBJECT_SHARED_VERSION: SequenceNumber = 1;

/// Assembles a [`ProgrammableTransaction`] command by command.
///
/// Identical inputs are only added once: the first occurrence keeps its index and later
/// ones refer back to it.
#[derive(Clone, Debug, Default)]
pub struct ProgrammableTransactionBuilder {
    inputs: Vec<CallArg>,
    indices: HashMap<CallArg, u16>,
    commands: Vec<Command>,
}

impl ProgrammableTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the builder, returning the transaction
    pub fn finish(self) -> ProgrammableTransaction {
        ProgrammableTransaction { inputs: self.inputs, commands: self.commands }
    }

    /// Adds an input, returning the argument which refers to it
    pub fn input(&mut self, arg: CallArg) -> Result<Argument, EncodingError> {
        if let Some(index) = self.indices.get(&arg) {
            return Ok(Argument::Input(*index))
        }
        let index = index_u16("inputs", self.inputs.len())?;
        self.indices.insert(arg.clone(), index);
        self.inputs.push(arg);
        Ok(Argument::Input(index))
    }

    /// Adds the canonical encoding of `value` as a pure input
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<Argument, EncodingError> {
        // the size limit is checked when the whole transaction is encoded
        let bytes = to_bcs(value)?;
        self.input(CallArg::Pure(bytes))
    }

    pub fn obj(&mut self, arg: ObjectArg) -> Result<Argument, EncodingError> {
        self.input(CallArg::Object(arg))
    }

    /// Appends a command, returning the argument which refers to its result
    pub fn command(&mut self, command: Command) -> Result<Argument, EncodingError> {
        self.push_command(command).map(Argument::Result)
    }

    fn push_command(&mut self, command: Command) -> Result<u16, EncodingError> {
        let index = index_u16("commands", self.commands.len())?;
        self.commands.push(command);
        Ok(index)
    }

    /// Calls a Move function with already available arguments
    pub fn programmable_move_call(
        &mut self,
        package: ObjectID,
        module: Identifier,
        function: Identifier,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Result<Argument, EncodingError> {
        self.command(Command::move_call(package, module, function, type_arguments, arguments))
    }

    /// Calls a Move function, adding each of `call_args` as an input first
    pub fn move_call(
        &mut self,
        package: ObjectID,
        module: Identifier,
        function: Identifier,
        type_arguments: Vec<TypeTag>,
        call_args: Vec<CallArg>,
    ) -> Result<Argument, EncodingError> {
        let arguments =
            call_args.into_iter().map(|arg| self.input(arg)).collect::<Result<Vec<_>, _>>()?;
        self.programmable_move_call(package, module, function, type_arguments, arguments)
    }

    pub fn transfer_arg(
        &mut self,
        recipient: SuiAddress,
        arg: Argument,
    ) -> Result<(), EncodingError> {
        self.transfer_args(recipient, vec![arg])
    }

    pub fn transfer_args(
        &mut self,
        recipient: SuiAddress,
        args: Vec<Argument>,
    ) -> Result<(), EncodingError> {
        let recipient = self.pure(&recipient)?;
        self.command(Command::TransferObjects(args, recipient))?;
        Ok(())
    }

    /// Transfers an owned object
    pub fn transfer_object(
        &mut self,
        recipient: SuiAddress,
        object: ObjectRef,
    ) -> Result<(), EncodingError> {
        let recipient = self.pure(&recipient)?;
        let object = self.obj(ObjectArg::ImmOrOwnedObject(object))?;
        self.command(Command::TransferObjects(vec![object], recipient))?;
        Ok(())
    }

    /// Transfers the whole gas coin, whatever remains of it once gas is paid
    pub fn pay_all_sui(&mut self, recipient: SuiAddress) -> Result<(), EncodingError> {
        self.transfer_arg(recipient, Argument::GasCoin)
    }

    /// Splits `amounts` off the gas coin, paying each to the recipient at the same position.
    ///
    /// Recipients named more than once get a single transfer. Transfers follow the order in
    /// which each recipient first appears.
    pub fn pay_sui(
        &mut self,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
    ) -> Result<(), EncodingError> {
        self.pay_impl(recipients, amounts, Argument::GasCoin)
    }

    /// Merges `coins` into the first of them, then splits and pays as [`Self::pay_sui`]
    pub fn pay(
        &mut self,
        coins: Vec<ObjectRef>,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
    ) -> Result<(), EncodingError> {
        let mut coins = coins.into_iter();
        let Some(coin) = coins.next() else {
            return Err(EncodingError::MissingField("input_coins"))
        };

        let coin = self.obj(ObjectArg::ImmOrOwnedObject(coin))?;
        let sources = coins
            .map(|c| self.obj(ObjectArg::ImmOrOwnedObject(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if !sources.is_empty() {
            self.command(Command::MergeCoins(coin, sources))?;
        }
        self.pay_impl(recipients, amounts, coin)
    }

    fn pay_impl(
        &mut self,
        recipients: Vec<SuiAddress>,
        amounts: Vec<u64>,
        coin: Argument,
    ) -> Result<(), EncodingError> {
        if recipients.len() != amounts.len() {
            return Err(EncodingError::LengthMismatch {
                left: "recipients",
                left_len: recipients.len(),
                right: "amounts",
                right_len: amounts.len(),
            })
        }

        let mut groups: Vec<(SuiAddress, Vec<u16>)> = Vec::new();
        let mut group_of: HashMap<SuiAddress, usize> = HashMap::new();
        let mut amount_args = Vec::with_capacity(amounts.len());
        for (i, (recipient, amount)) in recipients.into_iter().zip(amounts).enumerate() {
            let position = index_u16("split_amounts", i)?;
            match group_of.get(&recipient) {
                Some(&group) => groups[group].1.push(position),
                None => {
                    group_of.insert(recipient, groups.len());
                    groups.push((recipient, vec![position]));
                }
            }
            amount_args.push(self.pure(&amount)?);
        }

        let split = self.push_command(Command::SplitCoins(coin, amount_args))?;
        for (recipient, positions) in groups {
            let coins = positions.into_iter().map(|j| Argument::NestedResult(split, j)).collect();
            self.transfer_args(recipient, coins)?;
        }
        Ok(())
    }

    /// Stakes `coins`, merged together, with `validator`. Only `amount` of them is staked
    /// when given, the change staying with the sender.
    pub fn add_stake(
        &mut self,
        coins: Vec<ObjectRef>,
        amount: Option<u64>,
        validator: SuiAddress,
    ) -> Result<(), EncodingError> {
        let mut coins = coins.into_iter();
        let Some(coin) = coins.next() else { return Err(EncodingError::MissingField("coins")) };

        let system = self.system_state()?;
        let coin = self.obj(ObjectArg::ImmOrOwnedObject(coin))?;
        let sources = coins
            .map(|c| self.obj(ObjectArg::ImmOrOwnedObject(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if !sources.is_empty() {
            self.command(Command::MergeCoins(coin, sources))?;
        }

        let stake = match amount {
            Some(amount) => {
                let amount = self.pure(&amount)?;
                let split = self.push_command(Command::SplitCoins(coin, vec![amount]))?;
                Argument::NestedResult(split, 0)
            }
            None => coin,
        };
        let validator = self.pure(&validator)?;

        self.programmable_move_call(
            SUI_SYSTEM_PACKAGE_ID,
            Identifier::new("sui_system")?,
            Identifier::new("request_add_stake")?,
            vec![],
            vec![system, stake, validator],
        )?;
        Ok(())
    }

    /// Withdraws a `StakedSui` object, along with its rewards
    pub fn withdraw_stake(&mut self, staked_sui: ObjectRef) -> Result<(), EncodingError> {
        let system = self.system_state()?;
        let staked = self.obj(ObjectArg::ImmOrOwnedObject(staked_sui))?;
        self.programmable_move_call(
            SUI_SYSTEM_PACKAGE_ID,
            Identifier::new("sui_system")?,
            Identifier::new("request_withdraw_stake")?,
            vec![],
            vec![system, staked],
        )?;
        Ok(())
    }

    fn system_state(&mut self) -> Result<Argument, EncodingError> {
        self.obj(ObjectArg::SharedObject {
            id: SUI_SYSTEM_STATE_OBJECT_ID,
            initial_shared_version: SUI_SYSTEM_STATE_OBJECT_SHARED_VERSION,
            mutable: true,
        })
    }
}
