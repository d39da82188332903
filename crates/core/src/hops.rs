//! Pool `Swap` log extraction.
//!
//! Each V3 pool `Swap` log carries signed token0/token1 deltas. A valid swap
//! has exactly one positive (into the pool) and one negative (out of the
//! pool) amount; the sign pattern fixes the direction once the pool's token
//! pair is known. Token pairs are fetched over RPC with bounded concurrency
//! and cached for the duration of the decode.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolEvent;
use decoder_chain::{pool_tokens, IUniswapV3Pool, LogEntry, ReceiptData, SwapRpc, SWAP_TOPIC};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::DecodeError;

/// Cap on in-flight pool metadata lookups. Each lookup issues a
/// `token0`/`token1` call pair, so 4 concurrent lookups put at most 8
/// requests on the wire.
const MAX_CONCURRENT_LOOKUPS: usize = 4;

/// One atomic pool swap reconstructed from a `Swap` log.
#[derive(Debug, Clone)]
pub struct PoolHop {
    /// Receipt position; preserves on-chain ordering.
    pub log_index: u64,
    /// Emitting pool.
    pub pool: Address,
    pub token_in: Address,
    pub token_out: Address,
    /// Amount paid into the pool, in the input token's smallest unit.
    pub amount_in: U256,
    /// Amount received from the pool, in the output token's smallest unit.
    pub amount_out: U256,
}

/// Extract directed hops from the receipt, ascending by log index.
///
/// Fails with [`DecodeError::NotUniswapV3`] when the receipt has no `Swap`
/// logs at all. Logs whose amounts violate the one-in/one-out sign pattern
/// are dropped; the caller surfaces an empty result as unselectable.
pub async fn extract_hops(
    rpc: &dyn SwapRpc,
    receipt: &ReceiptData,
    pool_cache: &mut HashMap<Address, (Address, Address)>,
) -> Result<Vec<PoolHop>, DecodeError> {
    let swap_logs: Vec<&LogEntry> = receipt
        .logs
        .iter()
        .filter(|log| log.topics.first() == Some(&SWAP_TOPIC))
        .collect();

    if swap_logs.is_empty() {
        return Err(DecodeError::NotUniswapV3);
    }

    // Resolve token pairs for pools we have not seen yet.
    let mut missing: Vec<Address> = swap_logs
        .iter()
        .map(|log| log.address)
        .filter(|pool| !pool_cache.contains_key(pool))
        .collect();
    missing.sort_unstable();
    missing.dedup();

    let fetched: Vec<(Address, _)> = stream::iter(missing)
        .map(|pool| async move { (pool, pool_tokens(rpc, pool).await) })
        .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
        .collect()
        .await;
    for (pool, tokens) in fetched {
        pool_cache.insert(pool, tokens?);
    }

    let mut hops = Vec::with_capacity(swap_logs.len());
    for log in swap_logs {
        let event = match IUniswapV3Pool::Swap::decode_raw_log(log.topics.iter().copied(), &log.data) {
            Ok(event) => event,
            Err(e) => {
                warn!(pool = %log.address, log_index = log.log_index, error = %e, "undecodable Swap log");
                continue;
            }
        };

        let (token0, token1) = pool_cache[&log.address];
        let (amount0, amount1) = (event.amount0, event.amount1);

        // Positive delta flows into the pool, negative flows out. Anything
        // else (both same sign, or a zero side) is not a directed swap.
        let (token_in, token_out, amount_in, amount_out) =
            if amount0.is_positive() && amount1.is_negative() {
                (token0, token1, amount0.unsigned_abs(), amount1.unsigned_abs())
            } else if amount1.is_positive() && amount0.is_negative() {
                (token1, token0, amount1.unsigned_abs(), amount0.unsigned_abs())
            } else {
                debug!(pool = %log.address, log_index = log.log_index, "ambiguous swap direction, dropping");
                continue;
            };

        hops.push(PoolHop {
            log_index: log.log_index,
            pool: log.address,
            token_in,
            token_out,
            amount_in,
            amount_out,
        });
    }

    hops.sort_by_key(|hop| hop.log_index);
    debug!(hops = hops.len(), "extracted pool hops");
    Ok(hops)
}
