//! Chain interaction layer for the swap decoder.
//!
//! This crate provides:
//! - The `SwapRpc` capability consumed by the reconstruction pipeline
//!   (transaction, receipt, and `eth_call` lookups)
//! - An alloy-backed HTTP client with a memoized `eth_call` cache
//! - Contract bindings for Uniswap V3 pools and ERC-20 tokens
//! - Typed views over transactions, receipts, and logs

mod contracts;
mod provider;

pub use contracts::{pool_tokens, token_decimals, IUniswapV3Pool, IERC20, SWAP_TOPIC};
pub use provider::{LogEntry, ReceiptData, RpcClient, RpcError, SwapRpc, TxData};
