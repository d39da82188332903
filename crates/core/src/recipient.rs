//! Final recipient resolution.
//!
//! Routers frequently receive swap output themselves and forward it in a
//! follow-up call: `sweepToken` for ERC-20s, `unwrapWETH9` when the output
//! is wrapped native. When the declared recipient is a router (or the
//! Universal Router's "keep in router" placeholder), the payout helpers in
//! the flattened call list decide who actually gets paid; successive helpers
//! override each other, so the last write wins.

use alloy::primitives::Address;
use tracing::debug;

use crate::addresses::{is_router, UR_ADDRESS_THIS, UR_MSG_SENDER};
use crate::registry::DecodedCall;

/// Resolve who ultimately receives the swap output.
///
/// - No declared recipient (or the msg.sender placeholder) → `sender`.
/// - Declared recipient outside the router set → taken as final.
/// - Declared router recipient → walk the payout helpers; `sweepToken`
///   counts when its token matches `token_out` (or `token_out` is unknown),
///   `unwrapWETH9` counts unconditionally.
pub fn resolve_recipient(
    sender: Address,
    declared: Option<Address>,
    token_out: Option<Address>,
    calls: &[DecodedCall],
) -> Address {
    let Some(declared) = declared else {
        return sender;
    };
    if declared == UR_MSG_SENDER {
        return sender;
    }
    if !is_router(&declared) && declared != UR_ADDRESS_THIS {
        return declared;
    }

    let mut resolved = sender;
    for call in calls {
        match call {
            DecodedCall::SweepToken { token, recipient }
                if token_out.is_none() || token_out == Some(*token) =>
            {
                resolved = *recipient;
            }
            DecodedCall::UnwrapWeth { recipient } => {
                resolved = *recipient;
            }
            _ => {}
        }
    }

    debug!(%declared, %resolved, "resolved router-held recipient");
    resolved
}
