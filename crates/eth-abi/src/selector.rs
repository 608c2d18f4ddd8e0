use eth_keccak::keccak256;

use crate::types::AbiType;

/// Length of a function selector in bytes.
pub const SELECTOR_LEN: usize = 4;

/// First four bytes of `keccak256(signature)`.
///
/// The signature must already be canonical, e.g. `transfer(address,uint256)`
/// with no spaces and no `uint` aliases.
pub fn selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; SELECTOR_LEN];
    out.copy_from_slice(&hash[..SELECTOR_LEN]);
    out
}

/// Builds the canonical signature `name(t1,t2,...)` from parsed types.
pub fn function_signature(name: &str, types: &[AbiType]) -> String {
    let params: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("{name}({})", params.join(","))
}
