use eth_abi::AbiError;
use eth_rlp::RlpError;
use thiserror::Error;

/// Errors surfaced by the facade helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EthError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("abi error: {0}")]
    Abi(#[from] AbiError),

    #[error("rlp error: {0}")]
    Rlp(#[from] RlpError),
}
