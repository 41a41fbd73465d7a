//! Safe integer math helpers for fee settlement

/// Denominator for basis-point fractions (10000 = 100%).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Compute the basis-point share of an amount, rounding down.
///
/// Returns `None` if the intermediate multiplication overflows `i128`.
/// The floor rounding means the fee never exceeds the exact fraction;
/// any remainder stays with the seller side of a split.
///
/// # Arguments
/// * `amount` - The base amount (currency's smallest unit)
/// * `bps` - The fraction in basis points (10000 = 100%)
pub fn basis_points(amount: i128, bps: u32) -> Option<i128> {
    amount
        .checked_mul(bps as i128)?
        .checked_div(BPS_DENOMINATOR)
}
