use crate::{
    codec::{
        check_len, check_seq, EncodingError, ProtocolLimits, ValidityCheck, MAX_SEQUENCE_LENGTH,
    },
    types::{Bytes, Identifier, ObjectID, ObjectRef, SequenceNumber, TypeTag},
};
use serde::{Deserialize, Serialize};

/// A batch of commands executed atomically, whose results may feed into one another.
///
/// The `serde` layout of this module is the wire layout: variants are declared in the
/// order of their BCS index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

/// An input to a programmable transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallArg {
    /// A BCS-encoded pure value: an address, an amount, a string...
    Pure(Bytes),
    Object(ObjectArg),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectArg {
    /// An object owned by the sender, or an immutable one
    ImmOrOwnedObject(ObjectRef),
    /// A shared object. Only the version at which it became shared is needed, the
    /// current one is assigned by consensus.
    #[serde(rename_all = "camelCase")]
    SharedObject { id: ObjectID, initial_shared_version: SequenceNumber, mutable: bool },
    /// An object sent to another object, to be received by it
    Receiving(ObjectRef),
}

/// A single step of a programmable transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    /// `(objects, recipient)`
    TransferObjects(Vec<Argument>, Argument),
    /// `(coin, amounts)`
    SplitCoins(Argument, Vec<Argument>),
    /// `(target, sources)`
    MergeCoins(Argument, Vec<Argument>),
    /// `(modules, dependencies)`
    Publish(Vec<Bytes>, Vec<ObjectID>),
    /// `(element type, elements)`
    MakeMoveVec(Option<TypeTag>, Vec<Argument>),
    /// `(modules, dependencies, package, upgrade ticket)`
    Upgrade(Vec<Bytes>, Vec<ObjectID>, ObjectID, Argument),
}

/// A reference to a value available to a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Argument {
    /// The coin used to pay for gas
    GasCoin,
    /// One of the transaction's inputs
    Input(u16),
    /// The result of an earlier command
    Result(u16),
    /// One value out of an earlier command returning several
    NestedResult(u16, u16),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammableMoveCall {
    pub package: ObjectID,
    pub module: Identifier,
    pub function: Identifier,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

impl Command {
    pub fn move_call(
        package: ObjectID,
        module: Identifier,
        function: Identifier,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Self {
        Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module,
            function,
            type_arguments,
            arguments,
        }))
    }
}

impl ValidityCheck for ProgrammableTransaction {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        check_seq("inputs", &self.inputs, limits.max_inputs, limits)?;
        check_seq("commands", &self.commands, limits.max_commands, limits)
    }
}

impl ValidityCheck for CallArg {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        match self {
            CallArg::Pure(bytes) => check_len("pure", bytes.len(), limits.max_pure_argument_size),
            CallArg::Object(_) => Ok(()),
        }
    }
}

impl ValidityCheck for ProgrammableMoveCall {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        self.module.validity_check(limits)?;
        self.function.validity_check(limits)?;
        check_seq("type_arguments", &self.type_arguments, limits.max_type_arguments, limits)?;
        check_len("arguments", self.arguments.len(), limits.max_arguments)
    }
}

impl ValidityCheck for Command {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        match self {
            Command::MoveCall(call) => call.validity_check(limits),
            Command::TransferObjects(objects, _) => {
                check_len("transfer_objects", objects.len(), limits.max_arguments)
            }
            Command::SplitCoins(_, amounts) => {
                check_len("split_amounts", amounts.len(), limits.max_arguments)
            }
            Command::MergeCoins(_, sources) => {
                check_len("merge_sources", sources.len(), limits.max_arguments)
            }
            Command::Publish(modules, dependencies) |
            Command::Upgrade(modules, dependencies, ..) => {
                check_len("modules", modules.len(), limits.max_publish_modules)?;
                check_len("dependencies", dependencies.len(), MAX_SEQUENCE_LENGTH)
            }
            Command::MakeMoveVec(ty, elements) => {
                ty.validity_check(limits)?;
                check_len("elements", elements.len(), limits.max_arguments)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, encode_with_limits, to_bcs};
    use crate::types::{ObjectDigest, SuiAddress};

    #[test]
    fn argument_layout() {
        assert_eq!(to_bcs(&Argument::GasCoin).unwrap().to_vec(), vec![0]);
        assert_eq!(to_bcs(&Argument::Input(1)).unwrap().to_vec(), vec![1, 1, 0]);
        assert_eq!(to_bcs(&Argument::Result(258)).unwrap().to_vec(), vec![2, 2, 1]);
        assert_eq!(to_bcs(&Argument::NestedResult(1, 2)).unwrap().to_vec(), vec![3, 1, 0, 2, 0]);
    }

    #[test]
    fn shared_object_layout() {
        let arg = CallArg::Object(ObjectArg::SharedObject {
            id: ObjectID::from_u64(5),
            initial_shared_version: 1,
            mutable: true,
        });
        let mut expected = vec![1u8, 1];
        expected.extend(ObjectID::from_u64(5).as_bytes());
        expected.extend(1u64.to_le_bytes());
        expected.push(1);
        assert_eq!(encode(&arg).unwrap().to_vec(), expected);
    }

    #[test]
    fn receiving_differs_from_owned() {
        let obj = ObjectRef::new(ObjectID::from_u64(9), 1, ObjectDigest([0u8; 32]));
        let owned = to_bcs(&ObjectArg::ImmOrOwnedObject(obj)).unwrap();
        let receiving = to_bcs(&ObjectArg::Receiving(obj)).unwrap();
        assert_eq!(owned[0], 0);
        assert_eq!(receiving[0], 2);
        assert_eq!(owned[1..], receiving[1..]);
    }

    #[test]
    fn transfer_objects_layout() {
        let cmd = Command::TransferObjects(vec![Argument::GasCoin], Argument::Input(0));
        assert_eq!(encode(&cmd).unwrap().to_vec(), vec![1, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn move_call_layout() {
        let cmd = Command::move_call(
            ObjectID::from_u64(2),
            "coin".parse().unwrap(),
            "zero".parse().unwrap(),
            vec!["0x2::sui::SUI".parse().unwrap()],
            vec![],
        );
        let encoded = encode(&cmd).unwrap();
        assert_eq!(encoded[0], 0);
        assert_eq!(&encoded[1..33], SuiAddress::from_u64(2).as_bytes());
        assert_eq!(&encoded[33..45], b"\x04coin\x04zero\x01\x07");
        // empty arguments close the call
        assert_eq!(encoded[encoded.len() - 1], 0);
    }

    #[test]
    fn make_move_vec_option() {
        let untyped = encode(&Command::MakeMoveVec(None, vec![])).unwrap();
        assert_eq!(untyped.to_vec(), vec![5, 0, 0]);
        let typed = encode(&Command::MakeMoveVec(Some(TypeTag::U64), vec![])).unwrap();
        assert_eq!(typed.to_vec(), vec![5, 1, 2, 0]);
    }

    #[test]
    fn pure_size_limit() {
        let arg = CallArg::Pure(vec![0u8; 17].into());
        let limits = ProtocolLimits { max_pure_argument_size: 16, ..Default::default() };
        assert_eq!(
            encode_with_limits(&arg, limits).unwrap_err(),
            EncodingError::SequenceTooLong { field: "pure", len: 17, max: 16 }
        );
    }

    #[test]
    fn command_limit() {
        let pt = ProgrammableTransaction {
            inputs: vec![],
            commands: vec![Command::MergeCoins(Argument::GasCoin, vec![]); 3],
        };
        let limits = ProtocolLimits { max_commands: 2, ..Default::default() };
        assert_eq!(
            encode_with_limits(&pt, limits).unwrap_err(),
            EncodingError::SequenceTooLong { field: "commands", len: 3, max: 2 }
        );
    }

    #[test]
    fn commands_are_checked_element_by_element() {
        let deep = "vector<vector<vector<u8>>>".parse::<TypeTag>().unwrap();
        let pt = ProgrammableTransaction {
            inputs: vec![CallArg::Pure(vec![1u8].into())],
            commands: vec![Command::MakeMoveVec(Some(deep), vec![Argument::Input(0)])],
        };
        let limits = ProtocolLimits { max_type_argument_depth: 2, ..Default::default() };
        assert_eq!(
            encode_with_limits(&pt, limits).unwrap_err(),
            EncodingError::TypeTooDeep { depth: 3, max: 2 }
        );

        let call = Command::move_call(
            ObjectID::from_u64(2),
            "coin".parse().unwrap(),
            "zero".parse().unwrap(),
            vec![],
            vec![Argument::GasCoin; 3],
        );
        let limits = ProtocolLimits { max_arguments: 2, ..Default::default() };
        assert_eq!(
            encode_with_limits(&call, limits).unwrap_err(),
            EncodingError::SequenceTooLong { field: "arguments", len: 3, max: 2 }
        );
    }
}
