//! Candidate swap sequence enumeration.
//!
//! A candidate is a chained subsequence of hops: each hop's input token is
//! the previous hop's output token. Starting from every hop, the chain is
//! extended greedily through the remaining hops in log order, and every
//! prefix of every chain is emitted. Parallel unrelated swaps in the same
//! transaction surface as separate length-1 candidates for the scorer to
//! tell apart.

use alloy::primitives::Address;
use smallvec::{smallvec, SmallVec};

use crate::hops::PoolHop;

/// Upper bound on hops chained into one candidate.
pub const MAX_CHAIN: usize = 8;

/// Hop indices forming one candidate sequence.
pub type Candidate = SmallVec<[usize; MAX_CHAIN]>;

/// Enumerate every prefix of every maximal chain starting at each hop.
///
/// Quadratic in the number of hops, which is small in practice (a handful
/// per transaction).
pub fn enumerate_candidates(hops: &[PoolHop]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for start in 0..hops.len() {
        let mut chain: Candidate = smallvec![start];
        candidates.push(chain.clone());

        let mut last = start;
        for next in start + 1..hops.len() {
            if chain.len() == MAX_CHAIN {
                break;
            }
            if hops[next].token_in == hops[last].token_out {
                chain.push(next);
                candidates.push(chain.clone());
                last = next;
            }
        }
    }

    candidates
}

/// The token sequence a candidate traverses: first input, then each output.
pub fn token_sequence(hops: &[PoolHop], candidate: &Candidate) -> Vec<Address> {
    let mut tokens = Vec::with_capacity(candidate.len() + 1);
    tokens.push(hops[candidate[0]].token_in);
    tokens.extend(candidate.iter().map(|&i| hops[i].token_out));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn hop(log_index: u64, token_in: u8, token_out: u8) -> PoolHop {
        PoolHop {
            log_index,
            pool: addr(0xf0),
            token_in: addr(token_in),
            token_out: addr(token_out),
            amount_in: U256::from(100u64),
            amount_out: U256::from(90u64),
        }
    }

    #[test]
    fn test_empty_hops() {
        assert!(enumerate_candidates(&[]).is_empty());
    }

    #[test]
    fn test_single_hop() {
        let hops = vec![hop(0, 1, 2)];
        let candidates = enumerate_candidates(&hops);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].as_slice(), &[0]);
    }

    #[test]
    fn test_two_hop_chain_emits_prefixes() {
        let hops = vec![hop(0, 1, 2), hop(1, 2, 3)];
        let candidates = enumerate_candidates(&hops);

        let as_slices: Vec<&[usize]> = candidates.iter().map(|c| c.as_slice()).collect();
        assert_eq!(as_slices, vec![&[0][..], &[0, 1][..], &[1][..]]);
    }

    #[test]
    fn test_chain_invariant_holds() {
        let hops = vec![hop(0, 1, 2), hop(1, 5, 6), hop(2, 2, 3), hop(3, 3, 4)];
        for candidate in enumerate_candidates(&hops) {
            for pair in candidate.windows(2) {
                assert_eq!(hops[pair[1]].token_in, hops[pair[0]].token_out);
            }
        }
    }

    #[test]
    fn test_interleaved_unrelated_hop_is_skipped_over() {
        // 1->2, unrelated 7->8, then 2->3: the chain bridges over the noise.
        let hops = vec![hop(0, 1, 2), hop(1, 7, 8), hop(2, 2, 3)];
        let candidates = enumerate_candidates(&hops);

        assert!(candidates.iter().any(|c| c.as_slice() == [0, 2]));
    }

    #[test]
    fn test_parallel_swaps_stay_separate() {
        let hops = vec![hop(0, 1, 2), hop(1, 5, 6)];
        let candidates = enumerate_candidates(&hops);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_chain_length_is_bounded() {
        // 12 chainable hops: token i -> i+1.
        let hops: Vec<PoolHop> = (0..12).map(|i| hop(i as u64, i as u8 + 1, i as u8 + 2)).collect();
        let candidates = enumerate_candidates(&hops);
        assert!(candidates.iter().all(|c| c.len() <= MAX_CHAIN));
        assert!(candidates.iter().any(|c| c.len() == MAX_CHAIN));
    }

    #[test]
    fn test_token_sequence() {
        let hops = vec![hop(0, 1, 2), hop(1, 2, 3)];
        let candidate: Candidate = smallvec![0, 1];
        assert_eq!(token_sequence(&hops, &candidate), vec![addr(1), addr(2), addr(3)]);
    }
}
