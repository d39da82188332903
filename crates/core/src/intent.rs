//! Swap intent extraction.
//!
//! Intents are the declarations found in calldata: which tokens the caller
//! said they were swapping and where the proceeds should go. They are hints
//! for candidate scoring and recipient resolution; the receipt logs remain
//! the economic truth.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolValue;
use serde::Serialize;
use tracing::trace;

use crate::path::parse_path;
use crate::registry::{DecodedCall, V3SwapCommand};

/// Universal Router commands keep their opcode in the low five bits; the high
/// bits carry execution flags (allow-revert etc.).
const UR_COMMAND_MASK: u8 = 0x1f;
const V3_SWAP_EXACT_IN: u8 = 0x00;
const V3_SWAP_EXACT_OUT: u8 = 0x01;

/// Spacing between parent call indices, leaving room for Universal Router
/// sub-command indices without collisions.
pub const INTENT_IDX_STRIDE: u64 = 10_000;

/// Which call shape declared the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    ExactInputSingle,
    ExactOutputSingle,
    ExactInput,
    ExactOutput,
    V3SwapExactIn,
    V3SwapExactOut,
}

/// A declared swap: tokens, recipient, and (for path swaps) the full token
/// sequence. Fields are optional because a declaration can be partially
/// unparseable and still be worth keeping for its recipient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapIntent {
    /// Strict total order across the transaction's declarations.
    pub idx: u64,
    pub kind: IntentKind,
    pub token_in: Option<Address>,
    pub token_out: Option<Address>,
    pub recipient: Option<Address>,
    pub path_tokens: Option<Vec<Address>>,
}

impl SwapIntent {
    /// An intent carrying no token information contributes nothing to
    /// scoring (it may still carry a recipient).
    pub fn is_empty(&self) -> bool {
        self.token_in.is_none() && self.token_out.is_none() && self.path_tokens.is_none()
    }
}

/// Convert flattened decoded calls into intents.
pub fn build_intents(calls: &[DecodedCall]) -> Vec<SwapIntent> {
    let mut intents = Vec::new();

    for (i, call) in calls.iter().enumerate() {
        let idx = i as u64 * INTENT_IDX_STRIDE;
        match call {
            DecodedCall::ExactInputSingle {
                token_in,
                token_out,
                recipient,
            } => intents.push(SwapIntent {
                idx,
                kind: IntentKind::ExactInputSingle,
                token_in: Some(*token_in),
                token_out: Some(*token_out),
                recipient: Some(*recipient),
                path_tokens: None,
            }),
            DecodedCall::ExactOutputSingle {
                token_in,
                token_out,
                recipient,
            } => intents.push(SwapIntent {
                idx,
                kind: IntentKind::ExactOutputSingle,
                token_in: Some(*token_in),
                token_out: Some(*token_out),
                recipient: Some(*recipient),
                path_tokens: None,
            }),
            DecodedCall::ExactInput { path, recipient } => {
                intents.push(path_intent(idx, IntentKind::ExactInput, path, *recipient, false));
            }
            DecodedCall::ExactOutput { path, recipient } => {
                // exactOutput paths are encoded output-first.
                intents.push(path_intent(idx, IntentKind::ExactOutput, path, *recipient, true));
            }
            DecodedCall::Execute { commands, inputs } => {
                universal_router_intents(idx, commands, inputs, &mut intents);
            }
            DecodedCall::Multicall { .. }
            | DecodedCall::SweepToken { .. }
            | DecodedCall::UnwrapWeth { .. }
            | DecodedCall::RefundEth => {}
        }
    }

    intents
}

fn path_intent(
    idx: u64,
    kind: IntentKind,
    path: &[u8],
    recipient: Address,
    output_first: bool,
) -> SwapIntent {
    let tokens = parse_path(path);
    let (token_in, token_out) = if output_first {
        (tokens.last().copied(), tokens.first().copied())
    } else {
        (tokens.first().copied(), tokens.last().copied())
    };

    SwapIntent {
        idx,
        kind,
        token_in,
        token_out,
        recipient: Some(recipient),
        path_tokens: (!tokens.is_empty()).then_some(tokens),
    }
}

/// Decode the V3 swap commands out of a Universal Router command stream.
///
/// Each command byte is paired with one ABI-encoded input blob. Only
/// `V3_SWAP_EXACT_IN` and `V3_SWAP_EXACT_OUT` become intents; every other
/// opcode is ignored, and a sub-command that fails to decode is skipped so
/// the remaining commands still contribute.
fn universal_router_intents(
    parent_idx: u64,
    commands: &Bytes,
    inputs: &[Bytes],
    intents: &mut Vec<SwapIntent>,
) {
    for (i, (&command, input)) in commands.iter().zip(inputs).enumerate() {
        let idx = parent_idx + i as u64;
        let opcode = command & UR_COMMAND_MASK;
        let (kind, output_first) = match opcode {
            V3_SWAP_EXACT_IN => (IntentKind::V3SwapExactIn, false),
            V3_SWAP_EXACT_OUT => (IntentKind::V3SwapExactOut, true),
            _ => continue,
        };

        let Ok(payload) = V3SwapCommand::abi_decode_params(input) else {
            trace!(opcode, sub_command = i, "skipping undecodable router command");
            continue;
        };

        intents.push(path_intent(idx, kind, &payload.path, payload.recipient, output_first));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::encode_path;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn ur_payload(recipient: Address, path: Vec<u8>) -> Bytes {
        V3SwapCommand {
            recipient,
            amount: alloy::primitives::U256::from(100u64),
            amountLimit: alloy::primitives::U256::ZERO,
            path: path.into(),
            payerIsUser: true,
        }
        .abi_encode_params()
        .into()
    }

    #[test]
    fn test_single_swap_intents() {
        let calls = vec![
            DecodedCall::ExactInputSingle {
                token_in: addr(1),
                token_out: addr(2),
                recipient: addr(3),
            },
            DecodedCall::SweepToken {
                token: addr(2),
                recipient: addr(3),
            },
        ];

        let intents = build_intents(&calls);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].kind, IntentKind::ExactInputSingle);
        assert_eq!(intents[0].token_in, Some(addr(1)));
        assert_eq!(intents[0].token_out, Some(addr(2)));
        assert_eq!(intents[0].recipient, Some(addr(3)));
        assert!(intents[0].path_tokens.is_none());
    }

    #[test]
    fn test_exact_input_path_ordering() {
        let path = encode_path(&[addr(1), addr(2), addr(3)], &[500, 3000]);
        let calls = vec![DecodedCall::ExactInput {
            path: path.into(),
            recipient: addr(9),
        }];

        let intents = build_intents(&calls);
        assert_eq!(intents[0].token_in, Some(addr(1)));
        assert_eq!(intents[0].token_out, Some(addr(3)));
        assert_eq!(
            intents[0].path_tokens,
            Some(vec![addr(1), addr(2), addr(3)])
        );
    }

    #[test]
    fn test_exact_output_path_is_output_first() {
        let path = encode_path(&[addr(3), addr(2), addr(1)], &[500, 3000]);
        let calls = vec![DecodedCall::ExactOutput {
            path: path.into(),
            recipient: addr(9),
        }];

        let intents = build_intents(&calls);
        // Path tokens keep declaration order; token assignment reverses.
        assert_eq!(intents[0].token_in, Some(addr(1)));
        assert_eq!(intents[0].token_out, Some(addr(3)));
        assert_eq!(
            intents[0].path_tokens,
            Some(vec![addr(3), addr(2), addr(1)])
        );
    }

    #[test]
    fn test_empty_path_still_emits_intent() {
        let calls = vec![DecodedCall::ExactInput {
            path: vec![0u8; 5].into(),
            recipient: addr(9),
        }];

        let intents = build_intents(&calls);
        assert_eq!(intents.len(), 1);
        assert!(intents[0].is_empty());
        assert_eq!(intents[0].recipient, Some(addr(9)));
    }

    #[test]
    fn test_universal_router_commands() {
        let path_in = encode_path(&[addr(1), addr(2)], &[3000]);
        let path_out = encode_path(&[addr(5), addr(4)], &[500]);

        let calls = vec![DecodedCall::Execute {
            // wrap (ignored), exact-in with a flag bit set, exact-out
            commands: vec![0x0b, 0x80, 0x01].into(),
            inputs: vec![
                Bytes::new(),
                ur_payload(addr(7), path_in),
                ur_payload(addr(8), path_out),
            ],
        }];

        let intents = build_intents(&calls);
        assert_eq!(intents.len(), 2);

        assert_eq!(intents[0].kind, IntentKind::V3SwapExactIn);
        assert_eq!(intents[0].idx, 1);
        assert_eq!(intents[0].token_in, Some(addr(1)));
        assert_eq!(intents[0].token_out, Some(addr(2)));
        assert_eq!(intents[0].recipient, Some(addr(7)));

        assert_eq!(intents[1].kind, IntentKind::V3SwapExactOut);
        assert_eq!(intents[1].idx, 2);
        assert_eq!(intents[1].token_in, Some(addr(4)));
        assert_eq!(intents[1].token_out, Some(addr(5)));
    }

    #[test]
    fn test_undecodable_sub_command_is_skipped() {
        let path = encode_path(&[addr(1), addr(2)], &[3000]);
        let calls = vec![DecodedCall::Execute {
            commands: vec![0x00, 0x00].into(),
            inputs: vec![vec![0xff; 7].into(), ur_payload(addr(7), path)],
        }];

        let intents = build_intents(&calls);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].idx, 1);
    }

    #[test]
    fn test_intent_idx_spacing_preserves_order() {
        let path = encode_path(&[addr(1), addr(2)], &[3000]);
        let calls = vec![
            DecodedCall::RefundEth,
            DecodedCall::Execute {
                commands: vec![0x00].into(),
                inputs: vec![ur_payload(addr(7), path)],
            },
            DecodedCall::ExactInputSingle {
                token_in: addr(1),
                token_out: addr(2),
                recipient: addr(3),
            },
        ];

        let intents = build_intents(&calls);
        assert_eq!(intents.len(), 2);
        // Sub-command of call #1 sorts between call 0 and call 2 anchors.
        assert_eq!(intents[0].idx, INTENT_IDX_STRIDE);
        assert_eq!(intents[1].idx, 2 * INTENT_IDX_STRIDE);
        assert!(intents[0].idx < intents[1].idx);
    }
}
