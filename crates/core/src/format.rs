//! Human-readable amount formatting.
//!
//! Amounts arrive as non-negative 256-bit integers in the token's smallest
//! unit. Scaling is done on the decimal digit string so the result is exact
//! for any representable amount; no floating point is involved.

use alloy::primitives::U256;

/// Render `amount / 10^decimals` as a decimal string.
///
/// Trailing zeros in the fraction and a trailing decimal point are trimmed:
/// `50_000_000 / 10^6` renders as `"50"`, not `"50.0"`.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let scale = decimals as usize;

    let mut out = if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{int_part}.{frac_part}")
    } else {
        format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
    };

    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}
