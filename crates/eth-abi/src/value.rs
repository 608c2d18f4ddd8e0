use alloy_primitives::{Address, I256, U256};
use serde_json::Value;

use crate::error::AbiError;

/// A value paired with an [`AbiType`](crate::AbiType) at encode time, or
/// produced by the decoder.
///
/// The decoder always yields the canonical variant for each type: `Uint` for
/// `uintN`, `Int` for `intN`, `FixedBytes` for `bytesN`, and so on. The
/// encoder is more forgiving; see [`encode_args`](crate::encode_args).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Uint(U256),
    Int(I256),
    Bool(bool),
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
}

impl AbiValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Uint(_) => "uint",
            AbiValue::Int(_) => "int",
            AbiValue::Bool(_) => "bool",
            AbiValue::Address(_) => "address",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
            AbiValue::Array(_) => "array",
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            AbiValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the contents of `Bytes` or `FixedBytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(value) | AbiValue::FixedBytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(values) => Some(values),
            _ => None,
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AbiValue {
                fn from(value: $t) -> Self {
                    AbiValue::Uint(U256::from(value))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AbiValue {
                fn from(value: $t) -> Self {
                    let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
                    if value < 0 {
                        AbiValue::Int(magnitude.wrapping_neg())
                    } else {
                        AbiValue::Int(magnitude)
                    }
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, i128);

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

impl From<I256> for AbiValue {
    fn from(value: I256) -> Self {
        AbiValue::Int(value)
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(value)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(value: Vec<u8>) -> Self {
        AbiValue::Bytes(value)
    }
}

impl From<&[u8]> for AbiValue {
    fn from(value: &[u8]) -> Self {
        AbiValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for AbiValue {
    fn from(value: [u8; N]) -> Self {
        AbiValue::FixedBytes(value.to_vec())
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

impl From<Vec<AbiValue>> for AbiValue {
    fn from(values: Vec<AbiValue>) -> Self {
        AbiValue::Array(values)
    }
}

impl FromIterator<AbiValue> for AbiValue {
    fn from_iter<I: IntoIterator<Item = AbiValue>>(iter: I) -> Self {
        AbiValue::Array(iter.into_iter().collect())
    }
}

/// Converts a JSON value into an untyped ABI value.
///
/// Numbers become `Uint`/`Int`, strings stay strings (the encoder interprets
/// them per target type), arrays become `Array`. `null`, floats and objects
/// are rejected.
impl TryFrom<&Value> for AbiValue {
    type Error = AbiError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let unsupported = |reason: String| AbiError::UnsupportedValueType {
            ty: "json".into(),
            reason,
        };

        match value {
            Value::Bool(b) => Ok(AbiValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(AbiValue::from(u))
                } else if let Some(i) = n.as_i64() {
                    Ok(AbiValue::from(i))
                } else {
                    Err(unsupported(format!("float {n}")))
                }
            }
            Value::String(s) => Ok(AbiValue::String(s.clone())),
            Value::Array(values) => values
                .iter()
                .map(AbiValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(AbiValue::Array),
            Value::Null => Err(unsupported("null".into())),
            Value::Object(_) => Err(unsupported("object".into())),
        }
    }
}
