//! Calldata walker.
//!
//! Decodes the top-level transaction input through the selector registry and
//! recurses into `multicall` payloads, emitting a flattened list with each
//! parent ahead of its children. Universal Router `execute` payloads are NOT
//! recursed here; their command stream has its own decoding rules and is
//! handled by the intent builder.

use tracing::trace;

use crate::registry::{registry, DecodedCall};

/// Maximum `multicall` nesting depth.
pub const MAX_DEPTH: usize = 6;

/// Flatten the calldata into decoded calls, parents before children.
///
/// An unknown top-level selector yields an empty list; the transaction may
/// still be decodable from its logs alone.
pub fn walk_calldata(input: &[u8]) -> Vec<DecodedCall> {
    let mut calls = Vec::new();
    walk(input, 0, &mut calls);
    calls
}

fn walk(input: &[u8], depth: usize, out: &mut Vec<DecodedCall>) {
    if depth >= MAX_DEPTH {
        trace!(depth, "multicall nesting limit reached");
        return;
    }

    let Some(call) = registry().decode(input) else {
        return;
    };

    let children = match &call {
        DecodedCall::Multicall { calls } => Some(calls.clone()),
        _ => None,
    };

    trace!(name = call.name(), depth, "decoded call");
    out.push(call);

    if let Some(children) = children {
        for child in &children {
            walk(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ISwapRouter, ISwapRouter02};
    use alloy::primitives::aliases::{U160, U24};
    use alloy::primitives::{Address, Bytes, U256};
    use alloy::sol_types::SolCall;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn single_swap_calldata() -> Vec<u8> {
        ISwapRouter02::exactInputSingleCall {
            params: ISwapRouter02::ExactInputSingleParams {
                tokenIn: addr(1),
                tokenOut: addr(2),
                fee: U24::from(3000u32),
                recipient: addr(3),
                amountIn: U256::from(5u64),
                amountOutMinimum: U256::ZERO,
                sqrtPriceLimitX96: U160::ZERO,
            },
        }
        .abi_encode()
    }

    fn multicall_calldata(children: Vec<Bytes>) -> Vec<u8> {
        ISwapRouter::multicallCall { data: children }.abi_encode()
    }

    #[test]
    fn test_plain_call() {
        let calls = walk_calldata(&single_swap_calldata());
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name(), "exactInputSingle");
    }

    #[test]
    fn test_multicall_children_follow_parent() {
        let sweep = ISwapRouter02::sweepTokenCall {
            token: addr(9),
            amountMinimum: U256::ZERO,
            recipient: addr(3),
        }
        .abi_encode();
        let data = multicall_calldata(vec![single_swap_calldata().into(), sweep.into()]);

        let calls = walk_calldata(&data);
        let names: Vec<_> = calls.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["multicall", "exactInputSingle", "sweepToken"]);
    }

    #[test]
    fn test_nested_multicall_flattens() {
        let inner = multicall_calldata(vec![single_swap_calldata().into()]);
        let outer = multicall_calldata(vec![inner.into()]);

        let calls = walk_calldata(&outer);
        let names: Vec<_> = calls.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["multicall", "multicall", "exactInputSingle"]);
    }

    #[test]
    fn test_depth_limit_stops_recursion() {
        let mut data = single_swap_calldata();
        for _ in 0..MAX_DEPTH + 2 {
            data = multicall_calldata(vec![data.into()]);
        }

        let calls = walk_calldata(&data);
        assert_eq!(calls.len(), MAX_DEPTH);
        assert!(calls.iter().all(|c| c.name() == "multicall"));
    }

    #[test]
    fn test_unknown_selector_yields_empty() {
        assert!(walk_calldata(&[0xde, 0xad, 0xbe, 0xef]).is_empty());
        assert!(walk_calldata(&[]).is_empty());
    }

    #[test]
    fn test_undecodable_multicall_child_is_skipped() {
        let data = multicall_calldata(vec![vec![0xff; 8].into(), single_swap_calldata().into()]);
        let calls = walk_calldata(&data);
        let names: Vec<_> = calls.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["multicall", "exactInputSingle"]);
    }
}
