//! The reconstruction pipeline.
//!
//! Fetch transaction + receipt, walk the calldata into intents, extract pool
//! hops from the logs, enumerate and score candidate chains, resolve the
//! final recipient, and format the amounts. The receipt is the source of
//! economic truth; calldata only disambiguates and names the recipient.

use std::collections::HashMap;
use std::sync::LazyLock;

use alloy::primitives::{Address, B256};
use decoder_chain::{token_decimals, SwapRpc};
use regex_lite::Regex;
use tracing::debug;

use crate::calldata::walk_calldata;
use crate::candidates::enumerate_candidates;
use crate::error::DecodeError;
use crate::format::format_amount;
use crate::hops::extract_hops;
use crate::intent::build_intents;
use crate::recipient::resolve_recipient;
use crate::record::{candidate_records, SelectedRecord, SwapRecord};
use crate::score::select_best;

/// Fallback token scale when `decimals()` reverts or is absent.
const DEFAULT_DECIMALS: u8 = 18;

static TX_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0x[0-9a-fA-F]{64}$").expect("valid tx hash pattern"));

/// Reconstruct the logical Uniswap V3 swap behind `tx_hash`.
///
/// `return_all` adds the `_allSwapCandidates` / `_selected` debug sections
/// to the record.
pub async fn decode_swap(
    rpc: &dyn SwapRpc,
    tx_hash: &str,
    return_all: bool,
) -> Result<SwapRecord, DecodeError> {
    if !TX_HASH_RE.is_match(tx_hash) {
        return Err(DecodeError::InvalidInput(tx_hash.to_string()));
    }
    let hash: B256 = tx_hash
        .parse()
        .map_err(|_| DecodeError::InvalidInput(tx_hash.to_string()))?;

    let (tx, receipt) = tokio::join!(rpc.transaction_by_hash(hash), rpc.transaction_receipt(hash));
    let tx = tx?.ok_or(DecodeError::NotFound(hash))?;
    let receipt = receipt?.ok_or(DecodeError::NotFound(hash))?;
    if !receipt.status {
        return Err(DecodeError::Reverted(hash));
    }

    let calls = walk_calldata(&tx.input);
    let intents = build_intents(&calls);
    debug!(
        sender = %tx.from,
        value = %tx.value,
        calls = calls.len(),
        intents = intents.len(),
        logs = receipt.logs.len(),
        "walked calldata"
    );

    let mut pool_cache = HashMap::new();
    let hops = extract_hops(rpc, &receipt, &mut pool_cache).await?;

    let candidates = enumerate_candidates(&hops);
    if candidates.is_empty() {
        return Err(DecodeError::Unselectable);
    }

    let selection = select_best(&hops, &candidates, &intents).ok_or(DecodeError::Unselectable)?;
    let chosen = &candidates[selection.candidate_idx];
    let first = &hops[chosen[0]];
    let last = &hops[*chosen.last().expect("candidate is non-empty")];
    let (token_in, token_out) = (first.token_in, last.token_out);

    let intent = selection.intent_idx.map(|i| &intents[i]);
    let declared = intent.and_then(|intent| intent.recipient);
    let recipient = resolve_recipient(tx.from, declared, Some(token_out), &calls);

    let mut decimals_cache = HashMap::new();
    let decimals_in = fetch_decimals(rpc, token_in, &mut decimals_cache).await?;
    let decimals_out = fetch_decimals(rpc, token_out, &mut decimals_cache).await?;

    Ok(SwapRecord {
        sender: tx.from.to_checksum(None),
        recipient: recipient.to_checksum(None),
        token_in: token_in.to_checksum(None),
        token_out: token_out.to_checksum(None),
        amount_in: format_amount(first.amount_in, decimals_in),
        amount_out: format_amount(last.amount_out, decimals_out),
        all_swap_candidates: return_all.then(|| candidate_records(&hops, &candidates)),
        selected: return_all.then(|| SelectedRecord::new(&selection, intent)),
    })
}

async fn fetch_decimals(
    rpc: &dyn SwapRpc,
    token: Address,
    cache: &mut HashMap<Address, u8>,
) -> Result<u8, DecodeError> {
    if let Some(&decimals) = cache.get(&token) {
        return Ok(decimals);
    }
    let decimals = token_decimals(rpc, token).await?.unwrap_or(DEFAULT_DECIMALS);
    cache.insert(token, decimals);
    Ok(decimals)
}
