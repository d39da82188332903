//! Candidate × intent scoring and selection.
//!
//! The declared calldata path is a strong but fallible hint (inner routes
//! may rebalance through extra pools), while the logs are authoritative for
//! amounts. Scoring combines both: token endpoint matches earn a little,
//! exact or reversed path matches earn a lot, and ties fall to the larger
//! input amount so the primary trade beats dust hops.

use alloy::primitives::U256;
use tracing::debug;

use crate::candidates::{token_sequence, Candidate};
use crate::hops::PoolHop;
use crate::intent::SwapIntent;

const TOKEN_IN_MATCH: i64 = 10;
const TOKEN_OUT_MATCH: i64 = 10;
const PATH_EXACT_MATCH: i64 = 100;
const PATH_REVERSED_MATCH: i64 = 80;
const HOP_COUNT_MATCH: i64 = 15;
const HOP_COUNT_MISMATCH: i64 = -5;

/// Outcome of scoring: which candidate won, under which intent, and the
/// lexicographic key that won it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub candidate_idx: usize,
    pub intent_idx: Option<usize>,
    pub score: i64,
    /// First hop's input amount; the tie-breaker.
    pub amount_in: U256,
}

/// Score one `(candidate, intent)` pair.
///
/// A missing or token-free intent scores 0 and competes purely on amount.
pub fn score_pair(
    hops: &[PoolHop],
    candidate: &Candidate,
    intent: Option<&SwapIntent>,
) -> (i64, U256) {
    let first = &hops[candidate[0]];
    let amount_in = first.amount_in;

    let Some(intent) = intent.filter(|intent| !intent.is_empty()) else {
        return (0, amount_in);
    };

    let last = &hops[*candidate.last().expect("candidate is non-empty")];
    let mut score = 0;

    if intent.token_in == Some(first.token_in) {
        score += TOKEN_IN_MATCH;
    }
    if intent.token_out == Some(last.token_out) {
        score += TOKEN_OUT_MATCH;
    }

    if let Some(path) = intent.path_tokens.as_ref().filter(|path| path.len() >= 2) {
        let sequence = token_sequence(hops, candidate);
        let reversed: Vec<_> = path.iter().rev().copied().collect();

        if sequence == *path {
            score += PATH_EXACT_MATCH;
        } else if sequence == reversed {
            score += PATH_REVERSED_MATCH;
        }

        if candidate.len() == path.len() - 1 {
            score += HOP_COUNT_MATCH;
        } else {
            score += HOP_COUNT_MISMATCH;
        }
    }

    (score, amount_in)
}

/// Pick the best `(candidate, intent)` pair.
///
/// With intents present the full Cartesian product is ranked; without, each
/// candidate is ranked against the null intent. Ordering is lexicographic on
/// `(score, amount_in)`.
pub fn select_best(
    hops: &[PoolHop],
    candidates: &[Candidate],
    intents: &[SwapIntent],
) -> Option<Selection> {
    let mut best: Option<Selection> = None;

    let intent_choices: Vec<Option<usize>> = if intents.is_empty() {
        vec![None]
    } else {
        (0..intents.len()).map(Some).collect()
    };

    for &intent_idx in &intent_choices {
        for candidate_idx in 0..candidates.len() {
            let intent = intent_idx.map(|i| &intents[i]);
            let (score, amount_in) = score_pair(hops, &candidates[candidate_idx], intent);

            let improves = match &best {
                None => true,
                Some(best) => {
                    score > best.score || (score == best.score && amount_in > best.amount_in)
                }
            };
            if improves {
                best = Some(Selection {
                    candidate_idx,
                    intent_idx,
                    score,
                    amount_in,
                });
            }
        }
    }

    if let Some(selection) = &best {
        debug!(
            candidate = selection.candidate_idx,
            intent = ?selection.intent_idx,
            score = selection.score,
            amount_in = %selection.amount_in,
            "selected swap candidate"
        );
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentKind;
    use alloy::primitives::Address;
    use smallvec::smallvec;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn hop(log_index: u64, token_in: u8, token_out: u8, amount_in: u64) -> PoolHop {
        PoolHop {
            log_index,
            pool: addr(0xf0),
            token_in: addr(token_in),
            token_out: addr(token_out),
            amount_in: U256::from(amount_in),
            amount_out: U256::from(1u64),
        }
    }

    fn intent(
        token_in: Option<u8>,
        token_out: Option<u8>,
        path: Option<Vec<u8>>,
    ) -> SwapIntent {
        SwapIntent {
            idx: 0,
            kind: IntentKind::ExactInput,
            token_in: token_in.map(addr),
            token_out: token_out.map(addr),
            recipient: None,
            path_tokens: path.map(|bytes| bytes.into_iter().map(addr).collect()),
        }
    }

    #[test]
    fn test_null_intent_scores_zero_with_amount() {
        let hops = vec![hop(0, 1, 2, 500)];
        let candidate: Candidate = smallvec![0];
        assert_eq!(score_pair(&hops, &candidate, None), (0, U256::from(500u64)));
    }

    #[test]
    fn test_empty_intent_scores_like_null() {
        let hops = vec![hop(0, 1, 2, 500)];
        let candidate: Candidate = smallvec![0];
        let empty = intent(None, None, None);
        assert_eq!(
            score_pair(&hops, &candidate, Some(&empty)),
            (0, U256::from(500u64))
        );
    }

    #[test]
    fn test_token_endpoint_matches() {
        let hops = vec![hop(0, 1, 2, 500)];
        let candidate: Candidate = smallvec![0];

        let both = intent(Some(1), Some(2), None);
        assert_eq!(score_pair(&hops, &candidate, Some(&both)).0, 20);

        let only_in = intent(Some(1), Some(9), None);
        assert_eq!(score_pair(&hops, &candidate, Some(&only_in)).0, 10);
    }

    #[test]
    fn test_exact_path_beats_reversed_path() {
        let hops = vec![hop(0, 1, 2, 100), hop(1, 2, 3, 100)];
        let chain: Candidate = smallvec![0, 1];

        let forward = intent(Some(1), Some(3), Some(vec![1, 2, 3]));
        let (fwd_score, _) = score_pair(&hops, &chain, Some(&forward));
        assert_eq!(fwd_score, 10 + 10 + 100 + 15);

        // Declared output-first, as an exactOutput would.
        let reversed = intent(Some(1), Some(3), Some(vec![3, 2, 1]));
        let (rev_score, _) = score_pair(&hops, &chain, Some(&reversed));
        assert_eq!(rev_score, 10 + 10 + 80 + 15);
    }

    #[test]
    fn test_hop_count_mismatch_penalty() {
        let hops = vec![hop(0, 1, 2, 100)];
        let candidate: Candidate = smallvec![0];

        // Declared 2-hop path, observed 1 hop: no sequence match, penalty.
        let longer = intent(Some(1), Some(3), Some(vec![1, 2, 3]));
        let (score, _) = score_pair(&hops, &candidate, Some(&longer));
        assert_eq!(score, 10 - 5);
    }

    #[test]
    fn test_select_prefers_declared_chain_over_dust() {
        let hops = vec![
            hop(0, 1, 2, 1_000_000),
            hop(1, 2, 3, 995_000),
            hop(2, 7, 8, 50), // unrelated dust swap
        ];
        let candidates = enumerate(&hops);
        let intents = vec![intent(Some(1), Some(3), Some(vec![1, 2, 3]))];

        let selection = select_best(&hops, &candidates, &intents).unwrap();
        let chosen = &candidates[selection.candidate_idx];
        assert_eq!(chosen.as_slice(), &[0, 1]);
        assert_eq!(selection.intent_idx, Some(0));
    }

    #[test]
    fn test_tie_broken_by_amount() {
        let hops = vec![hop(0, 1, 2, 10), hop(1, 5, 6, 10_000)];
        let candidates = enumerate(&hops);

        let selection = select_best(&hops, &candidates, &[]).unwrap();
        let chosen = &candidates[selection.candidate_idx];
        assert_eq!(chosen.as_slice(), &[1]);
        assert_eq!(selection.amount_in, U256::from(10_000u64));
        assert!(selection.intent_idx.is_none());
    }

    #[test]
    fn test_no_candidates_yields_none() {
        assert!(select_best(&[], &[], &[]).is_none());
    }

    fn enumerate(hops: &[PoolHop]) -> Vec<Candidate> {
        crate::candidates::enumerate_candidates(hops)
    }
}
