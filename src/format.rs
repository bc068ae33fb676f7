//! Output-boundary rounding. Nothing in the engine rounds; these helpers run
//! only when a result is displayed or serialized.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for prices, dollar amounts, percentages and ratios.
pub const MONEY_DP: u32 = 2;

/// Decimal places for contract quantities.
pub const QUANTITY_DP: u32 = 4;

/// Round to 2 dp with a fixed scale, so `10000` renders as `10000.00`.
pub fn round_money(value: Decimal) -> Decimal {
    round_fixed(value, MONEY_DP)
}

/// Round to 4 dp with a fixed scale.
pub fn round_quantity(value: Decimal) -> Decimal {
    round_fixed(value, QUANTITY_DP)
}

fn round_fixed(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // -0.001 rounds to a negative zero; render it as plain zero
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(dp);
    rounded
}

/// Dollar amount for display, e.g. `$1088.89` or `$-72.73`.
pub fn usd(value: Decimal) -> String {
    format!("${}", round_money(value))
}

/// Percentage for display, e.g. `8.89%`.
pub fn pct(value: Decimal) -> String {
    format!("{}%", round_money(value))
}

/// Risk-reward ratio rendered as `1:X`.
pub fn ratio_text(ratio: Decimal) -> String {
    format!("1:{}", round_money(ratio))
}
