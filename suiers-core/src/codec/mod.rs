//! BCS, the Binary Canonical Serialization used by Sui for everything that is hashed or
//! signed.
//!
//! The wire model carries `serde` impls laid out the way Sui lays them out, and the bytes
//! come from [`bcs::to_bytes`]. Fixed width integers are little endian, sequences and enum
//! variant indices are prefixed by ULEB128 and structs are their fields in declaration
//! order, so the layout depends on field values alone.
//!
//! Before a value is serialized it goes through a [`ValidityCheck`] against
//! [`ProtocolLimits`]: a transaction the network would reject is never encoded.
mod error;
pub use error::EncodingError;

mod limits;
pub use limits::{ProtocolLimits, MAX_SEQUENCE_LENGTH};

use crate::types::Bytes;
use serde::Serialize;

/// A type whose contents are bounded by the protocol.
pub trait ValidityCheck {
    /// Fails if any part of `self` exceeds `limits`
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError>;
}

impl<T: ValidityCheck + ?Sized> ValidityCheck for &T {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        (**self).validity_check(limits)
    }
}

impl<T: ValidityCheck + ?Sized> ValidityCheck for Box<T> {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        (**self).validity_check(limits)
    }
}

impl<T: ValidityCheck> ValidityCheck for Option<T> {
    fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
        match self {
            Some(inner) => inner.validity_check(limits),
            None => Ok(()),
        }
    }
}

/// Checks and encodes `value` under the default protocol limits
pub fn encode<T: Serialize + ValidityCheck + ?Sized>(value: &T) -> Result<Bytes, EncodingError> {
    encode_with_limits(value, ProtocolLimits::default())
}

/// Checks and encodes `value` under the provided protocol limits
pub fn encode_with_limits<T: Serialize + ValidityCheck + ?Sized>(
    value: &T,
    limits: ProtocolLimits,
) -> Result<Bytes, EncodingError> {
    value.validity_check(&limits)?;
    to_bcs(value)
}

/// Serializes any value with no protocol checks, e.g. the contents of a pure argument
pub fn to_bcs<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, EncodingError> {
    Ok(bcs::to_bytes(value)?.into())
}

/// Fails if a sequence of `len` elements exceeds `max`
pub(crate) fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), EncodingError> {
    let max = max.min(MAX_SEQUENCE_LENGTH);
    if len > max {
        return Err(EncodingError::SequenceTooLong { field, len, max })
    }
    Ok(())
}

/// Checks the length of `items` and then every item
pub(crate) fn check_seq<T: ValidityCheck>(
    field: &'static str,
    items: &[T],
    max: usize,
    limits: &ProtocolLimits,
) -> Result<(), EncodingError> {
    check_len(field, items.len(), max)?;
    items.iter().try_for_each(|item| item.validity_check(limits))
}

/// Converts a sequence position into a `u16` command or input index
pub(crate) fn index_u16(field: &'static str, index: usize) -> Result<u16, EncodingError> {
    u16::try_from(index).map_err(|_| EncodingError::ValueOutOfRange {
        field,
        value: index as u128,
        width: "u16",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[derive(Serialize)]
    struct Commands(Vec<u8>);

    impl ValidityCheck for Commands {
        fn validity_check(&self, limits: &ProtocolLimits) -> Result<(), EncodingError> {
            check_len("commands", self.0.len(), limits.max_commands)
        }
    }

    #[test]
    fn sequence_lengths_are_uleb128() {
        let prefix = |len: usize, width: usize| to_bcs(&vec![0u8; len]).unwrap()[..width].to_vec();
        assert_eq!(prefix(0, 1), [0x00]);
        assert_eq!(prefix(127, 1), [0x7f]);
        assert_eq!(prefix(128, 2), [0x80, 0x01]);
        assert_eq!(prefix(300, 2), [0xac, 0x02]);
        assert_eq!(prefix(16384, 3), [0x80, 0x80, 0x01]);
    }

    #[test]
    fn integers_are_little_endian() {
        let encoded = to_bcs(&(0x0102u16, 0x01020304u32, 1u64, true)).unwrap();
        assert_eq!(encoded.as_ref(), &hex!("0201 04030201 0100000000000000 01")[..]);
    }

    #[test]
    fn limits_are_checked_before_serializing() {
        let value = Commands(vec![7; 5]);
        let limits = ProtocolLimits { max_commands: 4, ..Default::default() };
        assert_eq!(
            encode_with_limits(&value, limits).unwrap_err(),
            EncodingError::SequenceTooLong { field: "commands", len: 5, max: 4 }
        );
        assert_eq!(encode(&value).unwrap().to_vec(), vec![5, 7, 7, 7, 7, 7]);
        assert_eq!(encode(&Some(&value)).unwrap().to_vec(), vec![1, 5, 7, 7, 7, 7, 7]);
    }

    #[test]
    fn serializer_errors_are_mapped() {
        assert!(matches!(to_bcs(&1.5f64), Err(EncodingError::Bcs(bcs::Error::NotSupported(_)))));
    }

    #[test]
    fn index_overflow() {
        assert_eq!(index_u16("input", 65_535).unwrap(), u16::MAX);
        assert!(matches!(
            index_u16("input", 65_536),
            Err(EncodingError::ValueOutOfRange { field: "input", value: 65_536, width: "u16" })
        ));
    }
}
