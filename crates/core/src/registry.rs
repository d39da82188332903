//! Selector registry with trial ABI decoding.
//!
//! SwapRouter and SwapRouter02 expose the same function families with
//! different struct shapes (the older router carries a `deadline` field
//! inside each params struct, the newer one hoists it into `multicall`).
//! The differing field counts give each shape its own keccak selector, so on
//! mainnet the two generations never collide. The registry still maps every
//! selector to an ordered list of candidate decoders tried in registration
//! order: the native shape first, the sibling shape as a defensive fallback
//! for lookalike deployments that reuse a selector with a different layout.
//! Fixed-shape tuples additionally gate on the exact encoded length so a
//! mis-shaped blob cannot slip through a permissive tail.

use std::collections::HashMap;
use std::sync::LazyLock;

use alloy::primitives::{Address, Bytes};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Uniswap V3 SwapRouter (params structs carry the deadline).
    interface ISwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }

        struct ExactOutputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountOut;
            uint256 amountInMaximum;
            uint160 sqrtPriceLimitX96;
        }

        struct ExactOutputParams {
            bytes path;
            address recipient;
            uint256 deadline;
            uint256 amountOut;
            uint256 amountInMaximum;
        }

        function exactInputSingle(ExactInputSingleParams params) external payable returns (uint256 amountOut);
        function exactInput(ExactInputParams params) external payable returns (uint256 amountOut);
        function exactOutputSingle(ExactOutputSingleParams params) external payable returns (uint256 amountIn);
        function exactOutput(ExactOutputParams params) external payable returns (uint256 amountIn);
        function multicall(bytes[] data) external payable returns (bytes[] results);
    }

    /// Uniswap V3 SwapRouter02 (deadline hoisted out of the params structs).
    interface ISwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }

        struct ExactOutputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountOut;
            uint256 amountInMaximum;
            uint160 sqrtPriceLimitX96;
        }

        struct ExactOutputParams {
            bytes path;
            address recipient;
            uint256 amountOut;
            uint256 amountInMaximum;
        }

        function exactInputSingle(ExactInputSingleParams params) external payable returns (uint256 amountOut);
        function exactInput(ExactInputParams params) external payable returns (uint256 amountOut);
        function exactOutputSingle(ExactOutputSingleParams params) external payable returns (uint256 amountIn);
        function exactOutput(ExactOutputParams params) external payable returns (uint256 amountIn);
        function multicall(uint256 deadline, bytes[] data) external payable returns (bytes[] results);
        function sweepToken(address token, uint256 amountMinimum, address recipient) external payable;
        function unwrapWETH9(uint256 amountMinimum, address recipient) external payable;
        function refundETH() external payable;
    }

    /// Universal Router entry points.
    interface IUniversalRouter {
        function execute(bytes commands, bytes[] inputs) external payable;
        function execute(bytes commands, bytes[] inputs, uint256 deadline) external payable;
    }

    /// Payload of the Universal Router V3_SWAP_EXACT_IN / V3_SWAP_EXACT_OUT
    /// commands.
    struct V3SwapCommand {
        address recipient;
        uint256 amount;
        uint256 amountLimit;
        bytes path;
        bool payerIsUser;
    }
}

/// A router call normalized into the fields the pipeline consumes.
///
/// Deadline and no-deadline ABI variants of the same function collapse into
/// one variant here; downstream stages never care which router shape carried
/// the call.
#[derive(Debug, Clone)]
pub enum DecodedCall {
    ExactInputSingle {
        token_in: Address,
        token_out: Address,
        recipient: Address,
    },
    ExactOutputSingle {
        token_in: Address,
        token_out: Address,
        recipient: Address,
    },
    ExactInput {
        path: Bytes,
        recipient: Address,
    },
    ExactOutput {
        path: Bytes,
        recipient: Address,
    },
    Multicall {
        calls: Vec<Bytes>,
    },
    SweepToken {
        token: Address,
        recipient: Address,
    },
    UnwrapWeth {
        recipient: Address,
    },
    RefundEth,
    Execute {
        commands: Bytes,
        inputs: Vec<Bytes>,
    },
}

impl DecodedCall {
    /// Canonical function name, for logging and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExactInputSingle { .. } => "exactInputSingle",
            Self::ExactOutputSingle { .. } => "exactOutputSingle",
            Self::ExactInput { .. } => "exactInput",
            Self::ExactOutput { .. } => "exactOutput",
            Self::Multicall { .. } => "multicall",
            Self::SweepToken { .. } => "sweepToken",
            Self::UnwrapWeth { .. } => "unwrapWETH9",
            Self::RefundEth => "refundETH",
            Self::Execute { .. } => "execute",
        }
    }
}

type CandidateDecoder = fn(&[u8]) -> Option<DecodedCall>;

/// Immutable selector → ordered candidate decoder table.
pub struct SelectorRegistry {
    table: HashMap<[u8; 4], Vec<CandidateDecoder>>,
}

impl SelectorRegistry {
    fn new() -> Self {
        let mut reg = Self {
            table: HashMap::new(),
        };

        // Single-pool swaps: the native shape first, the sibling router's
        // shape as a fallback candidate.
        reg.register(
            ISwapRouter::exactInputSingleCall::SELECTOR,
            &[exact_input_single_with_deadline, exact_input_single],
        );
        reg.register(
            ISwapRouter02::exactInputSingleCall::SELECTOR,
            &[exact_input_single, exact_input_single_with_deadline],
        );
        reg.register(
            ISwapRouter::exactOutputSingleCall::SELECTOR,
            &[exact_output_single_with_deadline, exact_output_single],
        );
        reg.register(
            ISwapRouter02::exactOutputSingleCall::SELECTOR,
            &[exact_output_single, exact_output_single_with_deadline],
        );

        // Path swaps.
        reg.register(
            ISwapRouter::exactInputCall::SELECTOR,
            &[exact_input_with_deadline, exact_input],
        );
        reg.register(
            ISwapRouter02::exactInputCall::SELECTOR,
            &[exact_input, exact_input_with_deadline],
        );
        reg.register(
            ISwapRouter::exactOutputCall::SELECTOR,
            &[exact_output_with_deadline, exact_output],
        );
        reg.register(
            ISwapRouter02::exactOutputCall::SELECTOR,
            &[exact_output, exact_output_with_deadline],
        );

        // Batching.
        reg.register(ISwapRouter::multicallCall::SELECTOR, &[multicall]);
        reg.register(
            ISwapRouter02::multicallCall::SELECTOR,
            &[multicall_with_deadline],
        );

        // Payout helpers.
        reg.register(ISwapRouter02::sweepTokenCall::SELECTOR, &[sweep_token]);
        reg.register(ISwapRouter02::unwrapWETH9Call::SELECTOR, &[unwrap_weth9]);
        reg.register(ISwapRouter02::refundETHCall::SELECTOR, &[refund_eth]);

        // Universal Router.
        reg.register(IUniversalRouter::execute_0Call::SELECTOR, &[execute]);
        reg.register(
            IUniversalRouter::execute_1Call::SELECTOR,
            &[execute_with_deadline],
        );

        reg
    }

    fn register(&mut self, selector: [u8; 4], decoders: &[CandidateDecoder]) {
        self.table.insert(selector, decoders.to_vec());
    }

    /// Trial-decode `input` (selector-prefixed calldata).
    ///
    /// Returns `None` for an unknown selector, input shorter than a
    /// selector, or when every candidate rejects the argument blob.
    pub fn decode(&self, input: &[u8]) -> Option<DecodedCall> {
        if input.len() < 4 {
            return None;
        }
        let selector: [u8; 4] = input[..4].try_into().ok()?;
        let args = &input[4..];
        self.table
            .get(&selector)?
            .iter()
            .find_map(|decode| decode(args))
    }

    /// Number of registered selectors.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the registry is empty (never, after construction).
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

static REGISTRY: LazyLock<SelectorRegistry> = LazyLock::new(SelectorRegistry::new);

/// The process-wide selector registry, built once on first use.
pub fn registry() -> &'static SelectorRegistry {
    &REGISTRY
}

// Fixed-shape params structs encode to an exact word count; anything else is
// a different shape wearing the same selector.
const SINGLE_WITH_DEADLINE_LEN: usize = 8 * 32;
const SINGLE_LEN: usize = 7 * 32;

fn exact_input_single_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    if args.len() != SINGLE_WITH_DEADLINE_LEN {
        return None;
    }
    let p = ISwapRouter::exactInputSingleCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactInputSingle {
        token_in: p.tokenIn,
        token_out: p.tokenOut,
        recipient: p.recipient,
    })
}

fn exact_input_single(args: &[u8]) -> Option<DecodedCall> {
    if args.len() != SINGLE_LEN {
        return None;
    }
    let p = ISwapRouter02::exactInputSingleCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactInputSingle {
        token_in: p.tokenIn,
        token_out: p.tokenOut,
        recipient: p.recipient,
    })
}

fn exact_output_single_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    if args.len() != SINGLE_WITH_DEADLINE_LEN {
        return None;
    }
    let p = ISwapRouter::exactOutputSingleCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactOutputSingle {
        token_in: p.tokenIn,
        token_out: p.tokenOut,
        recipient: p.recipient,
    })
}

fn exact_output_single(args: &[u8]) -> Option<DecodedCall> {
    if args.len() != SINGLE_LEN {
        return None;
    }
    let p = ISwapRouter02::exactOutputSingleCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactOutputSingle {
        token_in: p.tokenIn,
        token_out: p.tokenOut,
        recipient: p.recipient,
    })
}

fn exact_input_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    let p = ISwapRouter::exactInputCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactInput {
        path: p.path,
        recipient: p.recipient,
    })
}

fn exact_input(args: &[u8]) -> Option<DecodedCall> {
    let p = ISwapRouter02::exactInputCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactInput {
        path: p.path,
        recipient: p.recipient,
    })
}

fn exact_output_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    let p = ISwapRouter::exactOutputCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactOutput {
        path: p.path,
        recipient: p.recipient,
    })
}

fn exact_output(args: &[u8]) -> Option<DecodedCall> {
    let p = ISwapRouter02::exactOutputCall::abi_decode_raw(args).ok()?.params;
    Some(DecodedCall::ExactOutput {
        path: p.path,
        recipient: p.recipient,
    })
}

fn multicall(args: &[u8]) -> Option<DecodedCall> {
    let c = ISwapRouter::multicallCall::abi_decode_raw(args).ok()?;
    Some(DecodedCall::Multicall { calls: c.data })
}

fn multicall_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    let c = ISwapRouter02::multicallCall::abi_decode_raw(args).ok()?;
    Some(DecodedCall::Multicall { calls: c.data })
}

fn sweep_token(args: &[u8]) -> Option<DecodedCall> {
    let c = ISwapRouter02::sweepTokenCall::abi_decode_raw(args).ok()?;
    Some(DecodedCall::SweepToken {
        token: c.token,
        recipient: c.recipient,
    })
}

fn unwrap_weth9(args: &[u8]) -> Option<DecodedCall> {
    let c = ISwapRouter02::unwrapWETH9Call::abi_decode_raw(args).ok()?;
    Some(DecodedCall::UnwrapWeth {
        recipient: c.recipient,
    })
}

fn refund_eth(args: &[u8]) -> Option<DecodedCall> {
    ISwapRouter02::refundETHCall::abi_decode_raw(args).ok()?;
    Some(DecodedCall::RefundEth)
}

fn execute(args: &[u8]) -> Option<DecodedCall> {
    let c = IUniversalRouter::execute_0Call::abi_decode_raw(args).ok()?;
    Some(DecodedCall::Execute {
        commands: c.commands,
        inputs: c.inputs,
    })
}

fn execute_with_deadline(args: &[u8]) -> Option<DecodedCall> {
    let c = IUniversalRouter::execute_1Call::abi_decode_raw(args).ok()?;
    Some(DecodedCall::Execute {
        commands: c.commands,
        inputs: c.inputs,
    })
}
