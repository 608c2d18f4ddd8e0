use alloy_primitives::{Address, I256, U256};
use serde_json::Value;

use crate::error::RlpError;

/// A node of an RLP tree: a byte string or an ordered list of nodes.
///
/// Integers, booleans and other scalar values have no representation of
/// their own; they are converted to byte strings with the `From`/`TryFrom`
/// impls below.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string, encoded as `0x80`.
    pub const fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// Builds an item from a big-endian unsigned integer, stripping leading
    /// zero bytes. Zero becomes the empty string.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        RlpItem::Bytes(bytes[start..].to_vec())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Returns the byte string, or `UnexpectedList`.
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(bytes) => Ok(bytes),
            RlpItem::List(_) => Err(RlpError::UnexpectedList),
        }
    }

    /// Returns the list elements, or `UnexpectedBytes`.
    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(RlpError::UnexpectedBytes),
        }
    }

    /// Reads a canonical big-endian integer of at most 64 bits.
    pub fn to_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.integer_bytes()?;
        if bytes.len() > 8 {
            return Err(RlpError::IntegerOverflow(64));
        }
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads a canonical big-endian integer of at most 256 bits.
    pub fn to_u256(&self) -> Result<U256, RlpError> {
        let bytes = self.integer_bytes()?;
        U256::try_from_be_slice(bytes).ok_or(RlpError::IntegerOverflow(256))
    }

    /// Reads a boolean stored as the integer 0 or 1.
    pub fn to_bool(&self) -> Result<bool, RlpError> {
        match self.to_u64()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(RlpError::UnsupportedValueType(format!(
                "boolean must be 0 or 1, got {other}"
            ))),
        }
    }

    /// Reads a 20-byte address.
    pub fn to_address(&self) -> Result<Address, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() != 20 {
            return Err(RlpError::UnsupportedValueType(format!(
                "address must be 20 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Address::from_slice(bytes))
    }

    fn integer_bytes(&self) -> Result<&[u8], RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::NonCanonical(
                "integer has a leading zero byte".into(),
            ));
        }
        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RlpItem {
                fn from(value: $t) -> Self {
                    RlpItem::from_be_bytes(&value.to_be_bytes())
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_try_from_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl TryFrom<$t> for RlpItem {
                type Error = RlpError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    <$u>::try_from(value)
                        .map(RlpItem::from)
                        .map_err(|_| RlpError::NegativeInteger(value.to_string()))
                }
            }
        )*
    };
}

impl_try_from_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

impl From<U256> for RlpItem {
    fn from(value: U256) -> Self {
        RlpItem::from_be_bytes(&value.to_be_bytes::<32>())
    }
}

impl TryFrom<I256> for RlpItem {
    type Error = RlpError;

    fn try_from(value: I256) -> Result<Self, Self::Error> {
        if value.is_negative() {
            return Err(RlpError::NegativeInteger(value.to_string()));
        }
        Ok(RlpItem::from(value.into_raw()))
    }
}

impl From<bool> for RlpItem {
    fn from(value: bool) -> Self {
        RlpItem::from(u8::from(value))
    }
}

impl From<Address> for RlpItem {
    fn from(value: Address) -> Self {
        RlpItem::Bytes(value.as_slice().to_vec())
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(value: Vec<u8>) -> Self {
        RlpItem::Bytes(value)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(value: &[u8]) -> Self {
        RlpItem::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for RlpItem {
    fn from(value: [u8; N]) -> Self {
        RlpItem::Bytes(value.to_vec())
    }
}

impl From<&str> for RlpItem {
    fn from(value: &str) -> Self {
        RlpItem::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for RlpItem {
    fn from(value: String) -> Self {
        RlpItem::Bytes(value.into_bytes())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(value: Vec<RlpItem>) -> Self {
        RlpItem::List(value)
    }
}

impl<T: Into<RlpItem>> From<Option<T>> for RlpItem {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(RlpItem::empty, Into::into)
    }
}

/// Converts a loosely typed JSON value into an RLP tree.
///
/// `null` is the empty string, `0x`-prefixed strings are hex byte strings and
/// any other string is taken as UTF-8 bytes. Floats and objects have no RLP
/// form.
impl TryFrom<&Value> for RlpItem {
    type Error = RlpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(RlpItem::empty()),
            Value::Bool(b) => Ok(RlpItem::from(*b)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(RlpItem::from(u))
                } else if n.as_i64().is_some() {
                    Err(RlpError::NegativeInteger(n.to_string()))
                } else {
                    Err(RlpError::UnsupportedValueType(format!("float {n}")))
                }
            }
            Value::String(s) => match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex_str) => hex::decode(hex_str)
                    .map(RlpItem::Bytes)
                    .map_err(|e| RlpError::UnsupportedValueType(format!("invalid hex: {e}"))),
                None => Ok(RlpItem::from(s.as_str())),
            },
            Value::Array(values) => values
                .iter()
                .map(RlpItem::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List),
            Value::Object(_) => Err(RlpError::UnsupportedValueType("object".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_is_empty_string() {
        assert_eq!(RlpItem::from(0u64), RlpItem::empty());
        assert_eq!(RlpItem::from(U256::ZERO), RlpItem::empty());
    }

    #[test]
    fn integers_are_minimal_big_endian() {
        assert_eq!(RlpItem::from(1024u32), RlpItem::Bytes(vec![0x04, 0x00]));
        assert_eq!(RlpItem::from(0xffu8), RlpItem::Bytes(vec![0xff]));
        assert_eq!(
            RlpItem::from(U256::from(0x0102_0304u64)),
            RlpItem::Bytes(vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn booleans_are_integers() {
        assert_eq!(RlpItem::from(true), RlpItem::Bytes(vec![1]));
        assert_eq!(RlpItem::from(false), RlpItem::empty());
    }

    #[test]
    fn none_is_empty_string() {
        assert_eq!(RlpItem::from(None::<u64>), RlpItem::empty());
        assert_eq!(RlpItem::from(Some(5u64)), RlpItem::Bytes(vec![5]));
    }

    #[test]
    fn negative_integers_are_rejected() {
        assert_eq!(
            RlpItem::try_from(-1i64),
            Err(RlpError::NegativeInteger("-1".into()))
        );
        assert!(RlpItem::try_from(I256::MINUS_ONE).is_err());
        assert_eq!(RlpItem::try_from(7i32).unwrap(), RlpItem::Bytes(vec![7]));
        assert_eq!(RlpItem::try_from(I256::ZERO).unwrap(), RlpItem::empty());
    }

    #[test]
    fn address_is_twenty_byte_string() {
        let addr = Address::repeat_byte(0xde);
        let item = RlpItem::from(addr);
        assert_eq!(item.as_bytes().unwrap().len(), 20);
        assert_eq!(item.to_address().unwrap(), addr);
    }

    #[test]
    fn to_u64_reads_back_integers() {
        for value in [0u64, 1, 0x7f, 0x80, 1024, u64::MAX] {
            assert_eq!(RlpItem::from(value).to_u64().unwrap(), value);
        }
    }

    #[test]
    fn to_u64_rejects_leading_zero() {
        let item = RlpItem::Bytes(vec![0x00, 0x01]);
        assert!(matches!(item.to_u64(), Err(RlpError::NonCanonical(_))));
    }

    #[test]
    fn to_u64_rejects_overflow() {
        let item = RlpItem::Bytes(vec![1; 9]);
        assert_eq!(item.to_u64(), Err(RlpError::IntegerOverflow(64)));
    }

    #[test]
    fn to_u256_reads_max() {
        let item = RlpItem::from(U256::MAX);
        assert_eq!(item.as_bytes().unwrap(), &[0xff; 32][..]);
        assert_eq!(item.to_u256().unwrap(), U256::MAX);
    }

    #[test]
    fn to_u256_rejects_33_bytes() {
        let item = RlpItem::Bytes(vec![1; 33]);
        assert_eq!(item.to_u256(), Err(RlpError::IntegerOverflow(256)));
    }

    #[test]
    fn to_bool_rejects_two() {
        assert!(RlpItem::from(true).to_bool().unwrap());
        assert!(!RlpItem::empty().to_bool().unwrap());
        assert!(RlpItem::from(2u8).to_bool().is_err());
    }

    #[test]
    fn accessors_report_shape_mismatch() {
        let list = RlpItem::List(vec![]);
        assert_eq!(list.as_bytes(), Err(RlpError::UnexpectedList));
        assert_eq!(RlpItem::empty().as_list(), Err(RlpError::UnexpectedBytes));
        assert!(list.is_list());
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(RlpItem::try_from(&json!(null)).unwrap(), RlpItem::empty());
        assert_eq!(RlpItem::try_from(&json!(true)).unwrap(), RlpItem::Bytes(vec![1]));
        assert_eq!(
            RlpItem::try_from(&json!(1024)).unwrap(),
            RlpItem::Bytes(vec![0x04, 0x00])
        );
        assert_eq!(
            RlpItem::try_from(&json!("0xdead")).unwrap(),
            RlpItem::Bytes(vec![0xde, 0xad])
        );
        assert_eq!(
            RlpItem::try_from(&json!("dog")).unwrap(),
            RlpItem::Bytes(b"dog".to_vec())
        );
    }

    #[test]
    fn json_arrays_become_lists() {
        let item = RlpItem::try_from(&json!(["cat", ["dog"], null])).unwrap();
        assert_eq!(
            item,
            RlpItem::List(vec![
                RlpItem::from("cat"),
                RlpItem::List(vec![RlpItem::from("dog")]),
                RlpItem::empty(),
            ])
        );
    }

    #[test]
    fn json_unsupported_values_are_rejected() {
        assert!(matches!(
            RlpItem::try_from(&json!(1.5)),
            Err(RlpError::UnsupportedValueType(_))
        ));
        assert!(matches!(
            RlpItem::try_from(&json!({"a": 1})),
            Err(RlpError::UnsupportedValueType(_))
        ));
        assert!(matches!(
            RlpItem::try_from(&json!(-3)),
            Err(RlpError::NegativeInteger(_))
        ));
        assert!(matches!(
            RlpItem::try_from(&json!("0xzz")),
            Err(RlpError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn json_nested_errors_propagate() {
        assert!(RlpItem::try_from(&json!([1, [2, {"x": 3}]])).is_err());
    }
}
