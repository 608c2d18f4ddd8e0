//! Byte-exact Ethereum encoding primitives.
//!
//! This crate ties the codec crates together and provides:
//! - Keccak-256 hashing (`eth_keccak`)
//! - canonical RLP encoding and decoding (`eth_rlp`)
//! - Solidity ABI encoding and decoding (`eth_abi`)
//! - address derivation from public keys with EIP-55 checksums
//! - ERC-20 calldata helpers (transfer, approve, balanceOf)

pub mod address;
pub mod erc20;
pub mod error;

pub use alloy_primitives::{Address, I256, U256};
pub use eth_abi::{self, AbiConfig, AbiDecoder, AbiError, AbiType, AbiValue};
pub use eth_keccak::{self, keccak256, keccak256_hex, Keccak256, KECCAK_EMPTY};
pub use eth_rlp::{self, RlpConfig, RlpDecoder, RlpError, RlpItem};

pub use address::{
    address_from_public_key, checksum_address, parse_address, to_checksum, validate_address,
};
pub use error::EthError;
