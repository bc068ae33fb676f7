//! Liquidation price, potential profit/loss and risk-reward for one position.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{checked_add, checked_div, checked_mul, checked_sub};
use crate::error::CalcError;
use crate::format::round_money;
use crate::models::{OrderType, PositionInput, PositionMetrics};

/// A 1:2 risk-reward or better is conventionally considered favorable.
pub const FAVORABLE_RISK_REWARD: Decimal = dec!(2);

/// Compute risk metrics for a leveraged long or short position.
///
/// At `leverage`x, an adverse move of `1/leverage` of the entry price wipes
/// out the margin, which puts the liquidation price below the entry for a
/// long and above it for a short.
///
/// Fails with [`CalcError::InvalidRatio`] when the potential loss is zero
/// (stop loss at the entry price), since the ratio is then undefined, and
/// with [`CalcError::Overflow`] when a product leaves the Decimal range.
pub fn compute_position_metrics(input: &PositionInput) -> Result<PositionMetrics, CalcError> {
    let total_position_size = checked_mul(input.position_size, input.leverage, "total position size")?;

    let margin_fraction = checked_div(Decimal::ONE, input.leverage, "liquidation distance")?;
    let liquidation_factor = match input.order_type {
        OrderType::Long => checked_sub(Decimal::ONE, margin_fraction, "liquidation price")?,
        OrderType::Short => checked_add(Decimal::ONE, margin_fraction, "liquidation price")?,
    };
    let liquidation_price = checked_mul(input.entry_price, liquidation_factor, "liquidation price")?;

    let (profit_move, loss_move) = match input.order_type {
        OrderType::Long => (
            checked_sub(input.take_profit, input.entry_price, "potential profit")?,
            checked_sub(input.entry_price, input.stop_loss, "potential loss")?,
        ),
        OrderType::Short => (
            checked_sub(input.entry_price, input.take_profit, "potential profit")?,
            checked_sub(input.stop_loss, input.entry_price, "potential loss")?,
        ),
    };

    let potential_profit = checked_mul(
        checked_div(profit_move, input.entry_price, "potential profit")?,
        total_position_size,
        "potential profit",
    )?;
    let potential_loss = checked_mul(
        checked_div(loss_move, input.entry_price, "potential loss")?,
        total_position_size,
        "potential loss",
    )?;

    if potential_loss.is_zero() {
        return Err(CalcError::InvalidRatio("potential loss is zero"));
    }
    let risk_reward_ratio = checked_div(potential_profit, potential_loss, "risk-reward ratio")?;

    // Judged on the ratio as displayed, so "1:2.00" is always favorable
    let is_favorable = round_money(risk_reward_ratio) >= FAVORABLE_RISK_REWARD;

    debug!(
        order_type = %input.order_type,
        total = %total_position_size,
        liquidation = %liquidation_price,
        ratio = %risk_reward_ratio,
        favorable = is_favorable,
        "Computed position metrics"
    );

    Ok(PositionMetrics {
        order_type: input.order_type,
        total_position_size,
        liquidation_price,
        potential_profit,
        potential_loss,
        risk_reward_ratio,
        is_favorable,
    })
}
