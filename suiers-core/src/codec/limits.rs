use serde::{Deserialize, Serialize};

/// The largest sequence length BCS can represent.
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;

/// Upper bounds the network enforces on a transaction's shape.
///
/// Anything over these limits is rejected by validators, so the encoder refuses to
/// produce it in the first place. The defaults track the mainnet protocol config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtocolLimits {
    /// Inputs of a programmable transaction
    pub max_inputs: usize,
    /// Commands of a programmable transaction
    pub max_commands: usize,
    /// Coins used to pay for gas
    pub max_gas_payment_objects: usize,
    /// Arguments of a single command
    pub max_arguments: usize,
    /// Type arguments of a single move call or struct tag
    pub max_type_arguments: usize,
    /// Nesting depth of a type argument
    pub max_type_argument_depth: usize,
    /// Size in bytes of a single pure input
    pub max_pure_argument_size: usize,
    /// Length in bytes of a Move identifier
    pub max_identifier_len: usize,
    /// Modules in a single publish or upgrade
    pub max_publish_modules: usize,
}

impl Default for ProtocolLimits {
    fn default() -> Self {
        Self {
            max_inputs: 2048,
            max_commands: 1024,
            max_gas_payment_objects: 256,
            max_arguments: 512,
            max_type_arguments: 16,
            max_type_argument_depth: 16,
            max_pure_argument_size: 16 * 1024,
            max_identifier_len: 128,
            max_publish_modules: 64,
        }
    }
}

impl ProtocolLimits {
    /// Limits which only enforce what BCS itself can represent
    pub fn unbounded() -> Self {
        Self {
            max_inputs: MAX_SEQUENCE_LENGTH,
            max_commands: MAX_SEQUENCE_LENGTH,
            max_gas_payment_objects: MAX_SEQUENCE_LENGTH,
            max_arguments: MAX_SEQUENCE_LENGTH,
            max_type_arguments: MAX_SEQUENCE_LENGTH,
            max_type_argument_depth: usize::MAX,
            max_pure_argument_size: MAX_SEQUENCE_LENGTH,
            max_identifier_len: MAX_SEQUENCE_LENGTH,
            max_publish_modules: MAX_SEQUENCE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let limits: ProtocolLimits =
            serde_json::from_str(r#"{"maxCommands": 8, "maxPureArgumentSize": 64}"#).unwrap();
        assert_eq!(limits.max_commands, 8);
        assert_eq!(limits.max_pure_argument_size, 64);
        assert_eq!(limits.max_inputs, ProtocolLimits::default().max_inputs);
    }
}
