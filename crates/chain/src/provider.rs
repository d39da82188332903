//! RPC capability for the swap decoder.
//!
//! The reconstruction pipeline only ever needs three operations:
//! `eth_getTransactionByHash`, `eth_getTransactionReceipt`, and `eth_call`
//! against the latest block. `SwapRpc` captures exactly that surface so the
//! pipeline can be driven by the alloy-backed [`RpcClient`] in production and
//! by in-memory fixtures in tests.

use alloy::consensus::Transaction as _;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError as TransportRpcError, TransportError};
use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors surfaced by the RPC layer.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport or JSON-RPC protocol failure.
    #[error("rpc transport error: {0}")]
    Transport(String),
    /// The node returned an error response for an `eth_call` (revert, etc.).
    #[error("eth_call failed: {0}")]
    Call(String),
    /// The node answered, but the payload did not decode as expected.
    #[error("malformed rpc response: {0}")]
    Malformed(String),
}

fn map_transport_err(e: TransportError) -> RpcError {
    match e {
        TransportRpcError::ErrorResp(payload) => RpcError::Call(payload.message.to_string()),
        other => RpcError::Transport(other.to_string()),
    }
}

/// Transaction fields the decoder consumes.
#[derive(Debug, Clone)]
pub struct TxData {
    /// Originating externally-owned account.
    pub from: Address,
    /// Raw calldata.
    pub input: Bytes,
    /// Native value attached to the call.
    pub value: U256,
}

/// One receipt log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Emitting contract.
    pub address: Address,
    /// Topic list; `topics[0]` is the event signature hash.
    pub topics: Vec<B256>,
    /// Unindexed event data.
    pub data: Bytes,
    /// Position within the block, preserves on-chain ordering.
    pub log_index: u64,
}

/// Receipt fields the decoder consumes.
#[derive(Debug, Clone)]
pub struct ReceiptData {
    /// `true` for a successful execution.
    pub status: bool,
    /// All logs emitted by the transaction.
    pub logs: Vec<LogEntry>,
}

/// The three-method RPC capability consumed by the reconstruction pipeline.
///
/// All `call`s are pinned to the latest block; the decoder never needs
/// historical state.
#[async_trait]
pub trait SwapRpc: Send + Sync {
    /// `eth_getTransactionByHash`; `None` for unknown hashes.
    async fn transaction_by_hash(&self, hash: B256) -> Result<Option<TxData>, RpcError>;

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptData>, RpcError>;

    /// `eth_call` at the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError>;
}

/// Alloy-backed `SwapRpc` implementation over an HTTP endpoint.
///
/// `eth_call` results are memoized by `(contract, calldata)`: within and
/// across decodes the client re-reads immutable facts (`token0`, `token1`,
/// `decimals`) far more often than chain state changes, so the cache is
/// read-mostly. The client may be shared across decodes.
pub struct RpcClient {
    provider: RootProvider,
    call_cache: DashMap<(Address, Bytes), Bytes>,
}

impl RpcClient {
    /// Connect to an HTTP JSON-RPC endpoint.
    pub fn connect(url: &str) -> Result<Self, RpcError> {
        let url = url
            .parse()
            .map_err(|e| RpcError::Transport(format!("invalid rpc url: {e}")))?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            call_cache: DashMap::new(),
        })
    }

    /// Number of memoized `eth_call` results.
    pub fn cached_calls(&self) -> usize {
        self.call_cache.len()
    }
}

#[async_trait]
impl SwapRpc for RpcClient {
    async fn transaction_by_hash(&self, hash: B256) -> Result<Option<TxData>, RpcError> {
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(map_transport_err)?;

        Ok(tx.map(|tx| TxData {
            from: tx.inner.signer(),
            input: tx.inner.input().clone(),
            value: tx.inner.value(),
        }))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptData>, RpcError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(map_transport_err)?;

        Ok(receipt.map(|receipt| {
            let logs = receipt
                .inner
                .logs()
                .iter()
                .enumerate()
                .map(|(i, log)| LogEntry {
                    address: log.inner.address,
                    topics: log.inner.data.topics().to_vec(),
                    data: log.inner.data.data.clone(),
                    log_index: log.log_index.unwrap_or(i as u64),
                })
                .collect();

            ReceiptData {
                status: receipt.status(),
                logs,
            }
        }))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        let key = (to, data.clone());
        if let Some(hit) = self.call_cache.get(&key) {
            trace!(%to, "eth_call cache hit");
            return Ok(hit.clone());
        }

        let req = TransactionRequest::default().with_to(to).with_input(data);
        let out = self.provider.call(req).await.map_err(map_transport_err)?;

        debug!(%to, bytes = out.len(), "eth_call");
        self.call_cache.insert(key, out.clone());
        Ok(out)
    }
}
