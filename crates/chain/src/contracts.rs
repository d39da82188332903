//! Contract interfaces used during swap reconstruction.
//!
//! Only the read surface the decoder actually touches is declared here:
//! the Uniswap V3 pool `Swap` event plus `token0()`/`token1()`, and the
//! ERC-20 `decimals()` getter. Calls are encoded with the generated types
//! and routed through the `SwapRpc` capability so they share its memo cache.

use alloy::primitives::{Address, B256};
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};

use crate::provider::{RpcError, SwapRpc};

sol! {
    /// Uniswap V3 pool (read subset).
    interface IUniswapV3Pool {
        event Swap(
            address indexed sender,
            address indexed recipient,
            int256 amount0,
            int256 amount1,
            uint160 sqrtPriceX96,
            uint128 liquidity,
            int24 tick
        );

        function token0() external view returns (address);
        function token1() external view returns (address);
    }
}

sol! {
    /// Standard ERC20 interface (subset for amount formatting)
    interface IERC20 {
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }
}

/// Topic0 of the V3 pool `Swap` event.
pub const SWAP_TOPIC: B256 = IUniswapV3Pool::Swap::SIGNATURE_HASH;

/// Resolve a pool's `token0`/`token1` pair through the RPC capability.
pub async fn pool_tokens(rpc: &dyn SwapRpc, pool: Address) -> Result<(Address, Address), RpcError> {
    let data0 = IUniswapV3Pool::token0Call {}.abi_encode();
    let data1 = IUniswapV3Pool::token1Call {}.abi_encode();

    let (ret0, ret1) = tokio::join!(rpc.call(pool, data0.into()), rpc.call(pool, data1.into()));

    let token0 = IUniswapV3Pool::token0Call::abi_decode_returns(&ret0?)
        .map_err(|e| RpcError::Malformed(format!("token0() return from {pool}: {e}")))?;
    let token1 = IUniswapV3Pool::token1Call::abi_decode_returns(&ret1?)
        .map_err(|e| RpcError::Malformed(format!("token1() return from {pool}: {e}")))?;

    Ok((token0, token1))
}

/// Query a token's `decimals()`.
///
/// Returns `Ok(None)` when the call reverts or the return data is not a
/// uint8 (non-standard tokens); the caller picks the fallback scale.
pub async fn token_decimals(rpc: &dyn SwapRpc, token: Address) -> Result<Option<u8>, RpcError> {
    let data = IERC20::decimalsCall {}.abi_encode();

    match rpc.call(token, data.into()).await {
        Ok(ret) => Ok(IERC20::decimalsCall::abi_decode_returns(&ret).ok()),
        Err(RpcError::Call(reason)) => {
            tracing::debug!(%token, %reason, "decimals() reverted");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
