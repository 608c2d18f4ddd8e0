use alloy_primitives::{Address, I256, U256};

use crate::config::AbiConfig;
use crate::encoder::{fits_signed, parse_types};
use crate::error::AbiError;
use crate::selector::{selector, SELECTOR_LEN};
use crate::types::AbiType;
use crate::value::AbiValue;
use crate::WORD;

/// Decodes argument data given as Solidity type strings, with the default
/// configuration.
pub fn decode_args(types: &[&str], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    let types = parse_types(types)?;
    decode(&types, data)
}

/// Decodes argument data against already parsed types.
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    AbiDecoder::default().decode(types, data)
}

/// Checks the 4-byte selector of `calldata` against `signature` and decodes
/// the arguments that follow it.
pub fn decode_call(
    signature: &str,
    types: &[&str],
    calldata: &[u8],
) -> Result<Vec<AbiValue>, AbiError> {
    if calldata.len() < SELECTOR_LEN {
        return Err(AbiError::TruncatedInput {
            offset: 0,
            needed: SELECTOR_LEN,
            available: calldata.len(),
        });
    }
    let (actual, args) = calldata.split_at(SELECTOR_LEN);
    let expected = selector(signature);
    if actual != expected {
        log::debug!("calldata selector 0x{} does not match {signature}", hex::encode(actual));
        return Err(AbiError::SelectorMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        });
    }
    decode_args(types, args)
}

/// ABI decoder with configurable limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiDecoder {
    config: AbiConfig,
}

impl AbiDecoder {
    pub fn new(config: AbiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AbiConfig {
        &self.config
    }

    /// Decodes `data` as a positional argument list of `types`.
    ///
    /// Every value comes back in canonical form. Any word that does not
    /// re-encode to itself is rejected rather than truncated.
    pub fn decode(&self, types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let types: Vec<&AbiType> = types.iter().collect();
        self.decode_sequence(&types, data, 0, 0)
    }

    /// Reads a head region starting at `base`. Dynamic offsets are relative
    /// to `base`.
    fn decode_sequence(
        &self,
        types: &[&AbiType],
        data: &[u8],
        base: usize,
        depth: usize,
    ) -> Result<Vec<AbiValue>, AbiError> {
        let mut values = Vec::with_capacity(types.len());
        let mut head = base;

        for ty in types {
            let value = if ty.is_dynamic() {
                let offset = read_usize(data, head)?;
                self.decode_value(ty, data, base + offset, depth)?
            } else {
                self.decode_value(ty, data, head, depth)?
            };
            values.push(value);
            head = head.saturating_add(ty.head_size());
        }

        Ok(values)
    }

    /// Decodes one value whose encoding starts at `at`: the head slot for
    /// static types, the dereferenced tail position for dynamic ones.
    fn decode_value(
        &self,
        ty: &AbiType,
        data: &[u8],
        at: usize,
        depth: usize,
    ) -> Result<AbiValue, AbiError> {
        match ty {
            AbiType::Uint(bits) => {
                let value = U256::from_be_bytes(read_word(data, at)?);
                if value.bit_len() > *bits {
                    return Err(rejected(format!("dirty high bits for {ty} at offset {at}")));
                }
                Ok(AbiValue::Uint(value))
            }
            AbiType::Int(bits) => {
                let raw = U256::from_be_bytes(read_word(data, at)?);
                if !fits_signed(raw, *bits) {
                    return Err(rejected(format!("bad sign extension for {ty} at offset {at}")));
                }
                Ok(AbiValue::Int(I256::from_raw(raw)))
            }
            AbiType::Bool => {
                let word = read_word(data, at)?;
                let value = U256::from_be_bytes(word);
                if value > U256::from(1u8) {
                    log::debug!("rejecting bool word at offset {at}");
                    return Err(AbiError::InvalidBoolValue(format!("0x{}", hex::encode(word))));
                }
                Ok(AbiValue::Bool(!value.is_zero()))
            }
            AbiType::Address => {
                let word = read_word(data, at)?;
                if word[..WORD - 20].iter().any(|&b| b != 0) {
                    return Err(rejected(format!("dirty address padding at offset {at}")));
                }
                Ok(AbiValue::Address(Address::from_slice(&word[WORD - 20..])))
            }
            AbiType::FixedBytes(size) => {
                let word = read_word(data, at)?;
                if word[*size..].iter().any(|&b| b != 0) {
                    return Err(rejected(format!("dirty padding for {ty} at offset {at}")));
                }
                Ok(AbiValue::FixedBytes(word[..*size].to_vec()))
            }
            AbiType::Bytes => Ok(AbiValue::Bytes(self.read_packed_bytes(data, at)?.to_vec())),
            AbiType::String => {
                let bytes = self.read_packed_bytes(data, at)?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| rejected(format!("invalid UTF-8 in string at offset {at}: {e}")))?;
                Ok(AbiValue::String(text.to_string()))
            }
            AbiType::FixedArray(inner, len) => {
                let depth = self.enter(depth)?;
                ensure_fits(data, at, *len, inner)?;
                let types = vec![inner.as_ref(); *len];
                self.decode_sequence(&types, data, at, depth)
                    .map(AbiValue::Array)
            }
            AbiType::Array(inner) => {
                let depth = self.enter(depth)?;
                let count = read_usize(data, at)?;
                let start = at + WORD;
                ensure_fits(data, start, count, inner)?;
                let types = vec![inner.as_ref(); count];
                self.decode_sequence(&types, data, start, depth)
                    .map(AbiValue::Array)
            }
        }
    }

    /// Reads a length-prefixed `bytes`/`string` payload.
    fn read_packed_bytes<'a>(&self, data: &'a [u8], at: usize) -> Result<&'a [u8], AbiError> {
        let len = read_usize(data, at)?;
        let start = at + WORD;
        if !self.config.validate_padding {
            return read_slice(data, start, len);
        }

        let padded = read_slice(data, start, len.div_ceil(WORD) * WORD)?;
        let (payload, padding) = padded.split_at(len);
        if padding.iter().any(|&b| b != 0) {
            return Err(rejected(format!("non-zero padding after offset {}", start + len)));
        }
        Ok(payload)
    }

    fn enter(&self, depth: usize) -> Result<usize, AbiError> {
        let depth = depth + 1;
        if depth > self.config.max_depth {
            log::debug!("array nesting exceeds {}", self.config.max_depth);
            return Err(AbiError::DepthExceeded(self.config.max_depth));
        }
        Ok(depth)
    }
}

// ---------------------------------------------------------------------------
// Word access
// ---------------------------------------------------------------------------

fn read_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], AbiError> {
    let available = data.len().saturating_sub(offset);
    if len > available {
        log::debug!("need {len} bytes at offset {offset}, have {available}");
        return Err(AbiError::TruncatedInput {
            offset,
            needed: len,
            available,
        });
    }
    Ok(&data[offset..offset + len])
}

/// Checks that the heads of `count` elements fit before allocating for them.
fn ensure_fits(data: &[u8], start: usize, count: usize, inner: &AbiType) -> Result<(), AbiError> {
    let available = data.len().saturating_sub(start);
    let needed = count.saturating_mul(inner.head_size());
    if needed > available {
        log::debug!("{count} elements of {inner} do not fit at offset {start}");
        return Err(AbiError::TruncatedInput {
            offset: start,
            needed,
            available,
        });
    }
    Ok(())
}

fn read_word(data: &[u8], offset: usize) -> Result<[u8; WORD], AbiError> {
    let mut word = [0u8; WORD];
    word.copy_from_slice(read_slice(data, offset, WORD)?);
    Ok(word)
}

/// Reads an offset, length or count word. Values that point beyond the
/// input are reported as truncation.
fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let value = U256::from_be_bytes(read_word(data, offset)?);
    match usize::try_from(value) {
        Ok(value) if value <= data.len() => Ok(value),
        converted => {
            log::debug!("offset or length word {value} at offset {offset} exceeds input");
            Err(AbiError::TruncatedInput {
                offset,
                needed: converted.unwrap_or(usize::MAX),
                available: data.len(),
            })
        }
    }
}

fn rejected(reason: String) -> AbiError {
    log::debug!("rejecting ABI data: {reason}");
    AbiError::InvalidEncoding(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode, encode_args, encode_call};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn word(n: u64) -> [u8; 32] {
        U256::from(n).to_be_bytes::<32>()
    }

    fn concat(words: &[[u8; 32]]) -> Vec<u8> {
        words.iter().flatten().copied().collect()
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    #[test]
    fn round_trip_mixed_arguments() {
        let types = [
            "uint8",
            "int16",
            "bool",
            "address",
            "bytes3",
            "bytes",
            "string",
            "uint32[2]",
            "string[]",
            "int256[][]",
        ];
        let values = vec![
            AbiValue::from(200u8),
            AbiValue::from(-300i64),
            AbiValue::Bool(true),
            AbiValue::Address(Address::repeat_byte(0x11)),
            AbiValue::FixedBytes(vec![1, 2, 3]),
            AbiValue::Bytes(vec![0xaa; 40]),
            AbiValue::from("héllo"),
            AbiValue::Array(vec![5u32.into(), 6u32.into()]),
            AbiValue::Array(vec!["x".into(), "".into()]),
            AbiValue::Array(vec![
                AbiValue::Array(vec![AbiValue::from(-1i64)]),
                AbiValue::Array(vec![]),
            ]),
        ];

        let encoded = encode_args(&types, &values).unwrap();
        let decoded = decode_args(&types, &encoded).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(encode_args(&types, &decoded).unwrap(), encoded);
    }

    #[test]
    fn round_trip_random_uint_arrays() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let len = rng.gen_range(0..10);
            let elements: Vec<AbiValue> = (0..len)
                .map(|_| AbiValue::Uint(U256::from_limbs(rng.gen::<[u64; 4]>())))
                .collect();
            let values = vec![AbiValue::Array(elements), AbiValue::Bytes(vec![7; len * 3])];
            let types = ["uint256[]", "bytes"];
            let encoded = encode_args(&types, &values).unwrap();
            assert_eq!(decode_args(&types, &encoded).unwrap(), values);
        }
    }

    #[test]
    fn hex_string_input_decodes_to_bytes() {
        let encoded = encode_args(&["bytes"], &[AbiValue::from("0x64617665")]).unwrap();
        assert_eq!(
            decode_args(&["bytes"], &encoded).unwrap(),
            vec![AbiValue::Bytes(b"dave".to_vec())]
        );
    }

    #[test]
    fn typed_decode_matches_string_decode() {
        let types = vec![AbiType::parse("uint256").unwrap(), AbiType::Bool];
        let values = vec![AbiValue::from(9u64), AbiValue::Bool(false)];
        let encoded = encode(&types, &values).unwrap();
        assert_eq!(decode(&types, &encoded).unwrap(), values);
    }

    // -----------------------------------------------------------------------
    // Word validation
    // -----------------------------------------------------------------------

    #[test]
    fn uint_with_dirty_high_bits() {
        let data = word(256);
        assert!(matches!(
            decode_args(&["uint8"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn int_with_bad_sign_extension() {
        // 0xff in the low byte with zero high bytes is 255, not -1.
        let data = word(0xff);
        assert!(matches!(
            decode_args(&["int8"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));

        let data = [0xff; 32];
        assert_eq!(
            decode_args(&["int8"], &data).unwrap(),
            vec![AbiValue::Int(I256::MINUS_ONE)]
        );
    }

    #[test]
    fn bool_word_must_be_zero_or_one() {
        assert!(matches!(
            decode_args(&["bool"], &word(2)),
            Err(AbiError::InvalidBoolValue(_))
        ));
        assert_eq!(
            decode_args(&["bool"], &word(0)).unwrap(),
            vec![AbiValue::Bool(false)]
        );
    }

    #[test]
    fn address_with_dirty_upper_bytes() {
        let mut data = [0u8; 32];
        data[0] = 1;
        assert!(matches!(
            decode_args(&["address"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn fixed_bytes_with_dirty_padding() {
        let mut data = [0u8; 32];
        data[0] = 0xab;
        data[31] = 1;
        assert!(matches!(
            decode_args(&["bytes1"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn string_must_be_utf8() {
        let data = concat(&[word(0x20), word(1), {
            let mut w = [0u8; 32];
            w[0] = 0xff;
            w
        }]);
        assert!(matches!(
            decode_args(&["string"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn bytes_padding_is_validated_by_default() {
        let mut tail = [0u8; 32];
        tail[0] = 0x61;
        tail[5] = 0x01;
        let data = concat(&[word(0x20), word(1), tail]);
        assert!(matches!(
            decode_args(&["bytes"], &data),
            Err(AbiError::InvalidEncoding(_))
        ));

        let lenient = AbiDecoder::new(AbiConfig {
            validate_padding: false,
            ..AbiConfig::default()
        });
        assert_eq!(
            lenient.decode(&[AbiType::Bytes], &data).unwrap(),
            vec![AbiValue::Bytes(vec![0x61])]
        );
    }

    #[test]
    fn missing_padding_is_truncation() {
        let data = [word(0x20).as_slice(), word(1).as_slice(), &[0x61]].concat();
        assert!(matches!(
            decode_args(&["bytes"], &data),
            Err(AbiError::TruncatedInput { .. })
        ));

        let lenient = AbiDecoder::new(AbiConfig {
            validate_padding: false,
            ..AbiConfig::default()
        });
        assert!(lenient.decode(&[AbiType::Bytes], &data).is_ok());
    }

    // -----------------------------------------------------------------------
    // Truncation and hostile offsets
    // -----------------------------------------------------------------------

    #[test]
    fn empty_input_is_truncated() {
        assert!(matches!(
            decode_args(&["uint256"], &[]),
            Err(AbiError::TruncatedInput {
                offset: 0,
                needed: 32,
                available: 0
            })
        ));
    }

    #[test]
    fn short_word_is_truncated() {
        assert!(matches!(
            decode_args(&["uint256"], &[0u8; 31]),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn offset_past_end() {
        let data = concat(&[word(0x1000)]);
        assert!(matches!(
            decode_args(&["bytes"], &data),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn huge_offset_word() {
        let data = [0xff; 32];
        assert!(matches!(
            decode_args(&["string"], &data),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn length_past_end() {
        let data = concat(&[word(0x20), word(64), word(0)]);
        assert!(matches!(
            decode_args(&["bytes"], &data),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn array_count_checked_before_allocation() {
        // Count fits under the input length but the elements cannot.
        let data = concat(&[word(0x20), word(0x40)]);
        assert!(matches!(
            decode_args(&["uint256[]"], &data),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn huge_fixed_array_checked_before_allocation() {
        let data = [0u8; 64];
        for ty in ["uint8[288230376151711744]", "uint8[100000000]", "string[288230376151711744]"] {
            assert!(
                matches!(decode_args(&[ty], &data), Err(AbiError::TruncatedInput { .. })),
                "{ty} should be truncated"
            );
        }
    }

    #[test]
    fn nested_fixed_array_overflowing_head_is_invalid_type() {
        assert!(matches!(
            decode_args(&["uint8[576460752303423488][576460752303423488]"], &[0u8; 64]),
            Err(AbiError::InvalidType(_))
        ));
    }

    #[test]
    fn hand_built_oversized_type_is_truncated() {
        let ty = AbiType::FixedArray(
            Box::new(AbiType::FixedArray(Box::new(AbiType::Uint(8)), 1 << 59)),
            1 << 59,
        );
        let args = [ty, AbiType::Bool];
        assert!(matches!(
            decode(&args, &[0u8; 64]),
            Err(AbiError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn depth_limit() {
        let types = ["uint256[][]"];
        let values = vec![AbiValue::Array(vec![AbiValue::Array(vec![1u64.into()])])];
        let encoded = encode_args(&types, &values).unwrap();

        let shallow = AbiDecoder::new(AbiConfig {
            max_depth: 1,
            ..AbiConfig::default()
        });
        let parsed = vec![AbiType::parse(types[0]).unwrap()];
        assert_eq!(
            shallow.decode(&parsed, &encoded),
            Err(AbiError::DepthExceeded(1))
        );
        assert_eq!(decode_args(&types, &encoded).unwrap(), values);
    }

    // -----------------------------------------------------------------------
    // Calls
    // -----------------------------------------------------------------------

    #[test]
    fn decode_call_round_trip() {
        let values = vec![
            AbiValue::Address(Address::repeat_byte(0x42)),
            AbiValue::from(1_000u64),
        ];
        let calldata = encode_call(
            "transfer(address,uint256)",
            &["address", "uint256"],
            &values,
        )
        .unwrap();
        let decoded =
            decode_call("transfer(address,uint256)", &["address", "uint256"], &calldata).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn decode_call_selector_mismatch() {
        let calldata = encode_call("approve(address,uint256)", &["uint256"], &[1u64.into()]).unwrap();
        assert_eq!(
            decode_call("transfer(address,uint256)", &["uint256"], &calldata),
            Err(AbiError::SelectorMismatch {
                expected: "a9059cbb".into(),
                actual: "095ea7b3".into(),
            })
        );
    }

    #[test]
    fn decode_call_too_short() {
        assert!(matches!(
            decode_call("f()", &[], &[0xab, 0xcd]),
            Err(AbiError::TruncatedInput {
                needed: 4,
                available: 2,
                ..
            })
        ));
    }

    #[test]
    fn decoder_exposes_config() {
        let decoder = AbiDecoder::new(AbiConfig {
            max_depth: 3,
            validate_padding: false,
        });
        assert_eq!(decoder.config().max_depth, 3);
        assert!(!decoder.config().validate_padding);
    }
}
