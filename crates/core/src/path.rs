//! Uniswap V3 packed path codec.
//!
//! A V3 path is `token(20) || (fee(3) || token(20))*`. Reconstruction only
//! needs the token sequence; fee tiers select the pool on-chain but the pool
//! address already arrives with each `Swap` log, so they are discarded here.

use alloy::primitives::Address;

const TOKEN_LEN: usize = 20;
const FEE_LEN: usize = 3;

/// Decode the token sequence out of a packed path.
///
/// A malformed or truncated tail terminates parsing at the last whole hop.
/// Fewer than 20 bytes yields an empty list.
pub fn parse_path(path: &[u8]) -> Vec<Address> {
    if path.len() < TOKEN_LEN {
        return Vec::new();
    }

    let mut tokens = vec![Address::from_slice(&path[..TOKEN_LEN])];
    let mut offset = TOKEN_LEN;
    while path.len() - offset >= FEE_LEN + TOKEN_LEN {
        offset += FEE_LEN;
        tokens.push(Address::from_slice(&path[offset..offset + TOKEN_LEN]));
        offset += TOKEN_LEN;
    }
    tokens
}

/// Encode a token sequence and fee tiers into a packed path.
///
/// Inverse of [`parse_path`] (modulo the discarded fees). Requires
/// `fees.len() + 1 == tokens.len()`; anything else yields an empty path.
pub fn encode_path(tokens: &[Address], fees: &[u32]) -> Vec<u8> {
    if tokens.is_empty() || tokens.len() != fees.len() + 1 {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(tokens.len() * TOKEN_LEN + fees.len() * FEE_LEN);
    path.extend_from_slice(tokens[0].as_slice());
    for (token, fee) in tokens[1..].iter().zip(fees) {
        path.extend_from_slice(&fee.to_be_bytes()[1..4]);
        path.extend_from_slice(token.as_slice());
    }
    path
}
