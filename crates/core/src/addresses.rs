//! Mainnet address book for swap reconstruction.
//!
//! Contains the Uniswap router deployments whose declared recipients must be
//! resolved through payout helpers, plus the Universal Router placeholder
//! recipients.

use alloy::primitives::{address, Address};

/// Wrapped native token (WETH9).
pub const WETH9: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// Uniswap V3 SwapRouter.
pub const SWAP_ROUTER: Address = address!("E592427A0AEce92De3Edee1F18E0157C05861564");

/// Uniswap V3 SwapRouter02.
pub const SWAP_ROUTER_02: Address = address!("68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");

/// Universal Router v1.
pub const UNIVERSAL_ROUTER: Address = address!("Ef1c6E67703c7BD7107eed8303Fbe6EC2554BF6B");

/// Universal Router v2.
pub const UNIVERSAL_ROUTER_V2: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

/// Universal Router placeholder meaning "send to msg.sender".
pub const UR_MSG_SENDER: Address = address!("0000000000000000000000000000000000000001");

/// Universal Router placeholder meaning "keep inside the router".
pub const UR_ADDRESS_THIS: Address = address!("0000000000000000000000000000000000000002");

/// Routers whose declared recipient is the contract itself, not the user.
pub static ROUTERS: &[Address] = &[
    SWAP_ROUTER,
    SWAP_ROUTER_02,
    UNIVERSAL_ROUTER,
    UNIVERSAL_ROUTER_V2,
];

/// Whether `addr` is one of the known router deployments.
pub fn is_router(addr: &Address) -> bool {
    ROUTERS.contains(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_set() {
        assert!(is_router(&SWAP_ROUTER));
        assert!(is_router(&SWAP_ROUTER_02));
        assert!(is_router(&UNIVERSAL_ROUTER));
        assert!(is_router(&UNIVERSAL_ROUTER_V2));
        assert!(!is_router(&WETH9));
        assert!(!is_router(&Address::ZERO));
    }
}
