use alloy_primitives::Address;
use eth_keccak::keccak256;

use crate::error::EthError;

/// Derives an Ethereum address from an uncompressed secp256k1 public key.
///
/// Accepts either the 65-byte SEC1 form (leading `0x04`) or the bare 64-byte
/// `x || y` form. The address is the last 20 bytes of the Keccak-256 hash of
/// the 64 coordinate bytes.
pub fn address_from_public_key(public_key: &[u8]) -> Result<Address, EthError> {
    let coordinates = match public_key.len() {
        65 if public_key[0] == 0x04 => &public_key[1..],
        65 => {
            return Err(EthError::InvalidPublicKey(
                "uncompressed key must start with 0x04".into(),
            ))
        }
        64 => public_key,
        n => {
            return Err(EthError::InvalidPublicKey(format!(
                "expected 64 or 65 bytes, got {n}"
            )))
        }
    };

    let hash = keccak256(coordinates);
    Ok(Address::from_slice(&hash[12..]))
}

/// Validates an Ethereum address string.
///
/// Checks that the address has the correct format (0x + 40 hex characters).
/// All-lowercase and all-uppercase addresses carry no checksum and are
/// accepted; mixed case must match EIP-55.
pub fn validate_address(address: &str) -> Result<bool, EthError> {
    let hex_part = hex_digits(address)?;

    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return Ok(true);
    }

    let checksummed = checksum_address(address)?;
    Ok(checksummed[2..] == *hex_part)
}

/// Applies EIP-55 mixed-case checksum encoding to an Ethereum address.
///
/// The input case is ignored; the returned string is `0x` followed by the
/// checksummed hex digits.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    let hex_part = hex_digits(address)?.to_lowercase();
    Ok(checksum_lower_hex(&hex_part))
}

/// Parses a `0x`-prefixed address, rejecting mixed-case input whose EIP-55
/// checksum does not match.
pub fn parse_address(address: &str) -> Result<Address, EthError> {
    if !validate_address(address)? {
        log::debug!("rejecting address with bad checksum: {address}");
        return Err(EthError::InvalidAddress(format!(
            "checksum mismatch for {address}"
        )));
    }

    let bytes = hex::decode(hex_digits(address)?)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;
    Ok(Address::from_slice(&bytes))
}

/// EIP-55 form of a parsed address.
pub fn to_checksum(address: &Address) -> String {
    checksum_lower_hex(&hex::encode(address.as_slice()))
}

/// Strips the `0x` prefix and checks for exactly 40 hex digits.
fn hex_digits(address: &str) -> Result<&str, EthError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EthError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }

    Ok(hex_part)
}

fn checksum_lower_hex(hex_part: &str) -> String {
    // EIP-55: hash the lowercase hex address (without 0x).
    let hash = keccak256(hex_part.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in hex_part.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    checksummed
}
