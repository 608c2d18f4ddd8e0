use std::fmt;
use std::str::FromStr;

use crate::error::AbiError;
use crate::WORD;

/// A parsed Solidity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `uintN`, N in 8..=256 and a multiple of 8.
    Uint(usize),
    /// `intN`, N in 8..=256 and a multiple of 8.
    Int(usize),
    Bool,
    Address,
    /// `bytesN`, N in 1..=32.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[N]`
    FixedArray(Box<AbiType>, usize),
    /// `T[]`
    Array(Box<AbiType>),
}

impl AbiType {
    /// Parses a Solidity type string such as `uint128[3]` or `bytes[]`.
    pub fn parse(ty: &str) -> Result<Self, AbiError> {
        if ty.starts_with('(') || ty.starts_with("tuple") {
            return Err(AbiError::UnsupportedType(ty.to_string()));
        }

        if let Some(body) = ty.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| AbiError::InvalidType(format!("unbalanced brackets in {ty}")))?;
            let inner = AbiType::parse(&body[..open])?;
            let len = &body[open + 1..];
            if len.is_empty() {
                return Ok(AbiType::Array(Box::new(inner)));
            }
            let len = parse_positive(len)
                .ok_or_else(|| AbiError::InvalidType(format!("invalid array length in {ty}")))?;
            if !inner.is_dynamic() && inner.head_size().checked_mul(len).is_none() {
                return Err(AbiError::InvalidType(format!("array too large: {ty}")));
            }
            return Ok(AbiType::FixedArray(Box::new(inner), len));
        }

        match ty {
            "address" => return Ok(AbiType::Address),
            "bool" => return Ok(AbiType::Bool),
            "string" => return Ok(AbiType::String),
            "bytes" => return Ok(AbiType::Bytes),
            "uint" => return Ok(AbiType::Uint(256)),
            "int" => return Ok(AbiType::Int(256)),
            "function" => return Err(AbiError::UnsupportedType(ty.to_string())),
            _ => {}
        }

        if ty.starts_with("fixed") || ty.starts_with("ufixed") {
            return Err(AbiError::UnsupportedType(ty.to_string()));
        }

        if let Some(bits) = ty.strip_prefix("uint") {
            return parse_int_width(bits, ty).map(AbiType::Uint);
        }
        if let Some(bits) = ty.strip_prefix("int") {
            return parse_int_width(bits, ty).map(AbiType::Int);
        }
        if let Some(size) = ty.strip_prefix("bytes") {
            return match parse_positive(size) {
                Some(size) if size <= WORD => Ok(AbiType::FixedBytes(size)),
                _ => Err(AbiError::InvalidType(format!("invalid bytes size in {ty}"))),
            };
        }

        Err(AbiError::InvalidType(ty.to_string()))
    }

    /// True for types whose encoding length depends on the value.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    /// Bytes this type occupies in an enclosing head region.
    ///
    /// Dynamic types take one offset word; static fixed arrays are inlined.
    /// Saturates at `usize::MAX` for hand-built types too large to encode.
    pub fn head_size(&self) -> usize {
        match self {
            AbiType::FixedArray(inner, len) if !inner.is_dynamic() => {
                inner.head_size().saturating_mul(*len)
            }
            _ => WORD,
        }
    }

    /// Nesting depth of array types (0 for elementary types).
    pub fn depth(&self) -> usize {
        match self {
            AbiType::FixedArray(inner, _) | AbiType::Array(inner) => 1 + inner.depth(),
            _ => 0,
        }
    }
}

/// Canonical form used in function signatures.
impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::Address => f.write_str("address"),
            AbiType::FixedBytes(size) => write!(f, "bytes{size}"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbiType::parse(s)
    }
}

/// Parses a decimal integer > 0 with no leading zero.
fn parse_positive(text: &str) -> Option<usize> {
    if text.is_empty() || text.starts_with('0') || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_int_width(bits: &str, ty: &str) -> Result<usize, AbiError> {
    match parse_positive(bits) {
        Some(bits) if bits % 8 == 0 && bits <= 256 => Ok(bits),
        _ => Err(AbiError::InvalidType(format!("invalid integer width in {ty}"))),
    }
}
