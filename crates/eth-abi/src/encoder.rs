use alloy_primitives::{Address, U256};

use crate::error::AbiError;
use crate::selector::selector;
use crate::types::AbiType;
use crate::value::AbiValue;
use crate::WORD;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Encodes a positional argument list given as Solidity type strings.
///
/// # Parameters
/// - `types`: type strings such as `"uint256"` or `"bytes[]"`
/// - `values`: one value per type, in the same order
///
/// # Returns
/// The head/tail encoding of the arguments, without a selector.
pub fn encode_args(types: &[&str], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let types = parse_types(types)?;
    encode(&types, values)
}

/// Encodes a positional argument list against already parsed types.
pub fn encode(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCountMismatch {
            types: types.len(),
            values: values.len(),
        });
    }
    let items: Vec<(&AbiType, &AbiValue)> = types.iter().zip(values).collect();
    encode_sequence(&items)
}

/// Encodes a function call: the 4-byte selector of `signature` followed by
/// the encoded arguments.
pub fn encode_call(
    signature: &str,
    types: &[&str],
    values: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    let args = encode_args(types, values)?;
    let selector = selector(signature);
    log::trace!("selector 0x{} for {signature}", hex::encode(selector));

    let mut calldata = Vec::with_capacity(selector.len() + args.len());
    calldata.extend_from_slice(&selector);
    calldata.extend_from_slice(&args);
    Ok(calldata)
}

/// Encodes a single integer as a 32-byte word.
///
/// `value` may be `Uint`, `Int`, or a decimal / `0x`-hex string with an
/// optional leading `-`. Negative values are written in two's complement.
pub fn encode_integer(value: &AbiValue, signed: bool, bits: usize) -> Result<[u8; WORD], AbiError> {
    let name = if signed { format!("int{bits}") } else { format!("uint{bits}") };
    if bits == 0 || bits % 8 != 0 || bits > 256 {
        return Err(AbiError::InvalidType(name));
    }

    let out_of_range = |value: String| AbiError::IntegerOutOfRange {
        ty: name.clone(),
        value,
    };

    let raw = match value {
        AbiValue::Uint(v) => {
            let limit = if signed { bits - 1 } else { bits };
            if v.bit_len() > limit {
                return Err(out_of_range(v.to_string()));
            }
            *v
        }
        AbiValue::Int(v) => {
            let raw = v.into_raw();
            let fits = if signed {
                fits_signed(raw, bits)
            } else {
                !v.is_negative() && raw.bit_len() <= bits
            };
            if !fits {
                return Err(out_of_range(v.to_string()));
            }
            raw
        }
        AbiValue::String(text) => {
            let (negative, magnitude) = parse_integer_text(text, &name)?;
            if !negative || magnitude.is_zero() {
                let limit = if signed { bits - 1 } else { bits };
                if magnitude.bit_len() > limit {
                    return Err(out_of_range(text.clone()));
                }
                magnitude
            } else {
                // -2^(bits-1) is the smallest representable value.
                if !signed || (magnitude - U256::from(1u8)).bit_len() > bits - 1 {
                    return Err(out_of_range(text.clone()));
                }
                magnitude.wrapping_neg()
            }
        }
        other => {
            return Err(AbiError::UnsupportedValueType {
                ty: name.clone(),
                reason: format!("expected integer, got {}", other.kind()),
            })
        }
    };

    Ok(raw.to_be_bytes::<WORD>())
}

// ---------------------------------------------------------------------------
// Head/tail layout
// ---------------------------------------------------------------------------

pub(crate) fn parse_types(types: &[&str]) -> Result<Vec<AbiType>, AbiError> {
    types.iter().map(|ty| AbiType::parse(ty)).collect()
}

/// Lays out `items` as a head region followed by the tails of the dynamic
/// items. Offsets are relative to the start of the head.
fn encode_sequence(items: &[(&AbiType, &AbiValue)]) -> Result<Vec<u8>, AbiError> {
    let head_len = items
        .iter()
        .fold(0usize, |len, (ty, _)| len.saturating_add(ty.head_size()));
    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (ty, value) in items {
        let encoded = encode_value(ty, value)?;
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len.saturating_add(tail.len())));
            tail.extend_from_slice(&encoded);
        } else {
            head.extend_from_slice(&encoded);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Static types produce their in-head words; dynamic types produce their
/// tail payload.
fn encode_value(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    match ty {
        AbiType::Uint(bits) => Ok(encode_integer(value, false, *bits)?.to_vec()),
        AbiType::Int(bits) => Ok(encode_integer(value, true, *bits)?.to_vec()),
        AbiType::Bool => Ok(usize_word(bool_value(value)? as usize).to_vec()),
        AbiType::Address => {
            let address = address_value(value)?;
            let mut word = [0u8; WORD];
            word[WORD - 20..].copy_from_slice(address.as_slice());
            Ok(word.to_vec())
        }
        AbiType::FixedBytes(size) => {
            let bytes = bytes_value(ty, value)?;
            if bytes.len() != *size {
                return Err(AbiError::InvalidLength {
                    ty: ty.to_string(),
                    expected: *size,
                    actual: bytes.len(),
                });
            }
            let mut word = [0u8; WORD];
            word[..*size].copy_from_slice(&bytes);
            Ok(word.to_vec())
        }
        AbiType::Bytes => Ok(encode_packed_bytes(&bytes_value(ty, value)?)),
        AbiType::String => match value {
            AbiValue::String(text) => Ok(encode_packed_bytes(text.as_bytes())),
            other => Err(AbiError::UnsupportedValueType {
                ty: ty.to_string(),
                reason: format!("expected string, got {}", other.kind()),
            }),
        },
        AbiType::FixedArray(inner, len) => {
            let elements = array_value(ty, value)?;
            if elements.len() != *len {
                return Err(AbiError::InvalidLength {
                    ty: ty.to_string(),
                    expected: *len,
                    actual: elements.len(),
                });
            }
            encode_elements(inner, elements)
        }
        AbiType::Array(inner) => {
            let elements = array_value(ty, value)?;
            let mut out = usize_word(elements.len()).to_vec();
            out.extend_from_slice(&encode_elements(inner, elements)?);
            Ok(out)
        }
    }
}

fn encode_elements(inner: &AbiType, elements: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let items: Vec<(&AbiType, &AbiValue)> = elements.iter().map(|value| (inner, value)).collect();
    encode_sequence(&items)
}

/// Length word, then the content right-padded to a word boundary.
fn encode_packed_bytes(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

pub(crate) fn usize_word(n: usize) -> [u8; WORD] {
    U256::from(n).to_be_bytes::<WORD>()
}

/// True when `raw` is a valid two's-complement `bits`-wide value
/// sign-extended to 256 bits.
pub(crate) fn fits_signed(raw: U256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let high = raw >> (bits - 1);
    high.is_zero() || high == U256::MAX >> (bits - 1)
}

// ---------------------------------------------------------------------------
// Value normalization
// ---------------------------------------------------------------------------

fn parse_integer_text(text: &str, ty: &str) -> Result<(bool, U256), AbiError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (digits, radix) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(AbiError::UnsupportedValueType {
            ty: ty.to_string(),
            reason: format!("not an integer: {text:?}"),
        });
    }

    // Digits are validated above, so a parse failure can only be overflow.
    let magnitude = U256::from_str_radix(digits, radix as u64).map_err(|_| {
        AbiError::IntegerOutOfRange {
            ty: ty.to_string(),
            value: text.to_string(),
        }
    })?;
    Ok((negative, magnitude))
}

fn bool_value(value: &AbiValue) -> Result<bool, AbiError> {
    match value {
        AbiValue::Bool(b) => Ok(*b),
        AbiValue::Uint(v) if *v <= U256::from(1u8) => Ok(!v.is_zero()),
        AbiValue::Int(v) if !v.is_negative() && v.into_raw() <= U256::from(1u8) => {
            Ok(!v.is_zero())
        }
        AbiValue::Uint(v) => Err(AbiError::InvalidBoolValue(v.to_string())),
        AbiValue::Int(v) => Err(AbiError::InvalidBoolValue(v.to_string())),
        other => Err(AbiError::InvalidBoolValue(format!("{other:?}"))),
    }
}

fn address_value(value: &AbiValue) -> Result<Address, AbiError> {
    let bytes = match value {
        AbiValue::Address(address) => return Ok(*address),
        AbiValue::Bytes(bytes) | AbiValue::FixedBytes(bytes) => bytes.clone(),
        AbiValue::String(text) => decode_hex(text)?,
        other => {
            return Err(AbiError::UnsupportedValueType {
                ty: "address".into(),
                reason: format!("expected address, got {}", other.kind()),
            })
        }
    };
    if bytes.len() != 20 {
        return Err(AbiError::InvalidLength {
            ty: "address".into(),
            expected: 20,
            actual: bytes.len(),
        });
    }
    Ok(Address::from_slice(&bytes))
}

fn bytes_value(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    match value {
        AbiValue::Bytes(bytes) | AbiValue::FixedBytes(bytes) => Ok(bytes.clone()),
        AbiValue::String(text) => decode_hex(text),
        other => Err(AbiError::UnsupportedValueType {
            ty: ty.to_string(),
            reason: format!("expected bytes, got {}", other.kind()),
        }),
    }
}

fn array_value<'a>(ty: &AbiType, value: &'a AbiValue) -> Result<&'a [AbiValue], AbiError> {
    match value {
        AbiValue::Array(elements) => Ok(elements),
        other => Err(AbiError::UnsupportedValueType {
            ty: ty.to_string(),
            reason: format!("expected array, got {}", other.kind()),
        }),
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>, AbiError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| AbiError::InvalidHex(format!("missing 0x prefix: {text}")))?;
    hex::decode(digits).map_err(|e| AbiError::InvalidHex(format!("{text}: {e}")))
}
