//! Keccak-256 as used by Ethereum.
//!
//! This is the original Keccak submission padding (`0x01 .. 0x80`), not the
//! NIST SHA3-256 padding. The crate provides:
//! - one-shot hashing to raw bytes or lowercase hex
//! - an incremental [`Keccak256`] hasher
//! - the underlying Keccak-f[1600] permutation

pub mod keccak;
pub mod permutation;

pub use keccak::{keccak256, keccak256_hex, Keccak256, KECCAK_EMPTY, OUTPUT_LEN, RATE};
pub use permutation::keccak_f1600;
