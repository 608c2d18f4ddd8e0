//! Recursive Length Prefix (RLP) codec.
//!
//! This crate provides:
//! - the [`RlpItem`] tree (byte strings and nested lists)
//! - canonical encoding of items and top-level lists
//! - a cursor-based decoder that rejects non-canonical input by default
//! - conversions from integers, booleans, byte buffers and JSON values

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod item;

pub use config::RlpConfig;
pub use decode::{decode, decode_exact, Header, RlpDecoder, RlpReader};
pub use encode::{encode, encode_list};
pub use error::RlpError;
pub use item::RlpItem;
