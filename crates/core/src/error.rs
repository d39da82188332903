//! Error taxonomy for swap reconstruction.

use alloy::primitives::B256;
use decoder_chain::RpcError;
use thiserror::Error;

/// Why a decode could not produce a swap record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Transaction or receipt is unknown to the node (or still pending).
    #[error("transaction {0} not found")]
    NotFound(B256),

    /// The transaction executed but reverted; there is no swap to report.
    #[error("transaction {0} reverted")]
    Reverted(B256),

    /// The receipt carries no Uniswap V3 pool `Swap` events.
    #[error("not a Uniswap V3 swap: no pool Swap events in receipt")]
    NotUniswapV3,

    /// Swap events were present but none survived filtering into a candidate.
    #[error("swap events present but no usable swap sequence")]
    Unselectable,

    /// Transport or node failure from the RPC collaborator.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The supplied transaction hash is not `0x` + 64 hex characters.
    #[error("invalid transaction hash: {0:?}")]
    InvalidInput(String),
}
