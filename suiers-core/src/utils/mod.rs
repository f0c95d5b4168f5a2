mod hash;
pub use hash::{
    blake2b256, hash_intent_message, hash_personal_message, intent_message,
    personal_message_preimage,
};
