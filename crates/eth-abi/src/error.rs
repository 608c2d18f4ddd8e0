use thiserror::Error;

/// ABI encoding and decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("unsupported value for {ty}: {reason}")]
    UnsupportedValueType { ty: String, reason: String },

    #[error("integer out of range for {ty}: {value}")]
    IntegerOutOfRange { ty: String, value: String },

    #[error("invalid bool value: {0}")]
    InvalidBoolValue(String),

    #[error("invalid length for {ty}: expected {expected}, got {actual}")]
    InvalidLength {
        ty: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("truncated input: need {needed} bytes at offset {offset}, have {available}")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("argument count mismatch: {types} types, {values} values")]
    ArgumentCountMismatch { types: usize, values: usize },

    #[error("selector mismatch: expected 0x{expected}, got 0x{actual}")]
    SelectorMismatch { expected: String, actual: String },

    #[error("nesting depth exceeds {0}")]
    DepthExceeded(usize),
}
