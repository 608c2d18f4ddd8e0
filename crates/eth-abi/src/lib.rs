//! Solidity contract ABI codec.
//!
//! This crate provides:
//! - a parser for Solidity type strings (`uint256`, `bytes32`, `address[]`, ...)
//! - head/tail encoding of positional argument lists and function calls
//! - strict decoding of ABI data back into typed values
//! - 4-byte function selectors derived with Keccak-256
//!
//! Tuple types are not supported and are always rejected.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod selector;
pub mod types;
pub mod value;

pub use config::AbiConfig;
pub use decoder::{decode, decode_args, decode_call, AbiDecoder};
pub use encoder::{encode, encode_args, encode_call, encode_integer};
pub use error::AbiError;
pub use selector::{function_signature, selector, SELECTOR_LEN};
pub use types::AbiType;
pub use value::AbiValue;

/// Size of an ABI word in bytes.
pub const WORD: usize = 32;
