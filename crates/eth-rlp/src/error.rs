use thiserror::Error;

/// RLP encoding and decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("truncated input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    #[error("negative integer cannot be encoded: {0}")]
    NegativeInteger(String),

    #[error("non-canonical encoding: {0}")]
    NonCanonical(String),

    #[error("length prefix does not fit in usize")]
    LengthOverflow,

    #[error("nesting depth exceeds {0}")]
    DepthExceeded(usize),

    #[error("{0} trailing bytes after item")]
    TrailingData(usize),

    #[error("expected a byte string, found a list")]
    UnexpectedList,

    #[error("expected a list, found a byte string")]
    UnexpectedBytes,

    #[error("integer does not fit in {0} bits")]
    IntegerOverflow(usize),
}
