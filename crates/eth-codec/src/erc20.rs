use alloy_primitives::U256;
use eth_abi::{decode_args, encode_call, AbiError, AbiValue};

use crate::address::parse_address;
use crate::error::EthError;

pub const TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";
pub const APPROVE_SIGNATURE: &str = "approve(address,uint256)";
pub const BALANCE_OF_SIGNATURE: &str = "balanceOf(address)";

/// Encodes an ERC-20 `transfer(address,uint256)` call.
///
/// # Parameters
///
/// - `to`: The recipient address (0x-prefixed hex string).
/// - `amount`: The transfer amount in token base units.
///
/// # Returns
///
/// The complete calldata (4-byte selector + 64 bytes of ABI-encoded params).
pub fn encode_transfer(to: &str, amount: U256) -> Result<Vec<u8>, EthError> {
    let to = parse_address(to)?;
    Ok(encode_call(
        TRANSFER_SIGNATURE,
        &["address", "uint256"],
        &[AbiValue::Address(to), AbiValue::Uint(amount)],
    )?)
}

/// Encodes an ERC-20 `approve(address,uint256)` call.
///
/// # Parameters
///
/// - `spender`: The spender address (0x-prefixed hex string).
/// - `amount`: The approval amount in token base units.
///
/// # Returns
///
/// The complete calldata (4-byte selector + 64 bytes of ABI-encoded params).
pub fn encode_approve(spender: &str, amount: U256) -> Result<Vec<u8>, EthError> {
    let spender = parse_address(spender)?;
    Ok(encode_call(
        APPROVE_SIGNATURE,
        &["address", "uint256"],
        &[AbiValue::Address(spender), AbiValue::Uint(amount)],
    )?)
}

/// Encodes an ERC-20 `balanceOf(address)` call.
pub fn encode_balance_of(owner: &str) -> Result<Vec<u8>, EthError> {
    let owner = parse_address(owner)?;
    Ok(encode_call(
        BALANCE_OF_SIGNATURE,
        &["address"],
        &[AbiValue::Address(owner)],
    )?)
}

/// Decodes a single uint256 return value, such as the result of
/// `balanceOf`. Bytes after the first word are ignored.
pub fn decode_uint256(data: &[u8]) -> Result<U256, EthError> {
    match decode_args(&["uint256"], data)?.as_slice() {
        [AbiValue::Uint(value)] => Ok(*value),
        other => Err(AbiError::InvalidEncoding(format!(
            "expected one uint256, decoded {other:?}"
        ))
        .into()),
    }
}
