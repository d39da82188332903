//! Core swap reconstruction pipeline.
//!
//! Given a transaction hash and the three-method RPC capability from
//! `decoder-chain`, this crate rebuilds the logical Uniswap V3 swap the
//! transaction performed:
//! - Selector registry with trial ABI decoding over router call shapes
//! - Calldata walker that flattens `multicall` batches
//! - Intent extraction, including Universal Router command streams
//! - Pool `Swap` log extraction with direction inference
//! - Candidate chain enumeration and intent-aware scoring
//! - Recipient resolution through `sweepToken` / `unwrapWETH9` payouts
//! - Human-readable amount formatting

mod addresses;
mod calldata;
mod candidates;
mod decode;
mod error;
mod format;
mod hops;
mod intent;
mod path;
mod recipient;
mod record;
mod registry;
mod score;

pub use addresses::{is_router, ROUTERS, SWAP_ROUTER, SWAP_ROUTER_02, UNIVERSAL_ROUTER, UNIVERSAL_ROUTER_V2, WETH9};
pub use calldata::{walk_calldata, MAX_DEPTH};
pub use candidates::{enumerate_candidates, token_sequence, Candidate, MAX_CHAIN};
pub use decode::decode_swap;
pub use error::DecodeError;
pub use format::format_amount;
pub use hops::{extract_hops, PoolHop};
pub use intent::{build_intents, IntentKind, SwapIntent};
pub use path::{encode_path, parse_path};
pub use recipient::resolve_recipient;
pub use record::{HopRecord, SelectedRecord, SwapRecord};
pub use registry::{registry, DecodedCall, SelectorRegistry};
pub use score::{score_pair, select_best, Selection};
