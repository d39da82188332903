//! Output record types.
//!
//! The primary record is the six-field canonical swap; the optional debug
//! sections expose every enumerated candidate and the winning selection for
//! diagnosis. All addresses are EIP-55 checksummed strings and all amounts
//! are decimal strings.

use serde::Serialize;

use crate::candidates::Candidate;
#[cfg(test)]
use crate::format::format_amount;
use crate::hops::PoolHop;
use crate::intent::SwapIntent;
use crate::score::Selection;

/// The canonical decoded swap.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub sender: String,
    pub recipient: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out: String,
    #[serde(rename = "_allSwapCandidates", skip_serializing_if = "Option::is_none")]
    pub all_swap_candidates: Option<Vec<Vec<HopRecord>>>,
    #[serde(rename = "_selected", skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectedRecord>,
}

/// One hop, rendered for debug output. Amounts stay in smallest units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HopRecord {
    pub log_index: u64,
    pub pool: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out: String,
}

impl HopRecord {
    pub fn from_hop(hop: &PoolHop) -> Self {
        Self {
            log_index: hop.log_index,
            pool: hop.pool.to_checksum(None),
            token_in: hop.token_in.to_checksum(None),
            token_out: hop.token_out.to_checksum(None),
            amount_in: hop.amount_in.to_string(),
            amount_out: hop.amount_out.to_string(),
        }
    }
}

/// The winning `(candidate, intent)` pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRecord {
    pub score: i64,
    pub tie_breaker_amount_in_int: String,
    pub intent_used: Option<SwapIntent>,
}

impl SelectedRecord {
    pub fn new(selection: &Selection, intent: Option<&SwapIntent>) -> Self {
        Self {
            score: selection.score,
            tie_breaker_amount_in_int: selection.amount_in.to_string(),
            intent_used: intent.cloned(),
        }
    }
}

/// Render every candidate as its hop list, for the `_allSwapCandidates`
/// debug section.
pub fn candidate_records(hops: &[PoolHop], candidates: &[Candidate]) -> Vec<Vec<HopRecord>> {
    candidates
        .iter()
        .map(|candidate| candidate.iter().map(|&i| HopRecord::from_hop(&hops[i])).collect())
        .collect()
}
