//! Averaging into an open position at the current market price.

use rust_decimal_macros::dec;
use tracing::debug;

use super::{checked_add, checked_div, checked_mul, checked_sub, contract_qty};
use crate::error::CalcError;
use crate::models::{DcaInput, DcaResult};

/// Compute the outcome of adding `dca_amount` of margin at `current_price`.
///
/// The new average entry is weighted by contracts: total leveraged cost over
/// total contract quantity. P&L and value are expressed in real money, i.e.
/// with the leverage taken back out.
pub fn compute_dca(input: &DcaInput) -> Result<DcaResult, CalcError> {
    let original_investment = input.position_size;
    let dca_investment = input.dca_amount;
    let total_investment = checked_add(original_investment, dca_investment, "total investment")?;
    let leveraged_position = checked_mul(total_investment, input.leverage, "leveraged position")?;

    let original_contract_qty = contract_qty(input.position_size, input.leverage, input.entry_price)?;
    let dca_contract_qty = contract_qty(input.dca_amount, input.leverage, input.current_price)?;
    let total_contract_qty = checked_add(original_contract_qty, dca_contract_qty, "contract quantity")?;

    let new_average_entry = checked_div(leveraged_position, total_contract_qty, "new average entry")?;

    let current_value = checked_div(
        checked_mul(total_contract_qty, input.current_price, "current value")?,
        input.leverage,
        "current value",
    )?;
    let unrealized_pnl = checked_sub(current_value, total_investment, "unrealized P&L")?;
    let roi_percentage = checked_mul(
        checked_div(unrealized_pnl, total_investment, "return on investment")?,
        dec!(100),
        "return on investment",
    )?;

    let breakeven_price_change = checked_mul(
        checked_div(
            checked_sub(new_average_entry, input.current_price, "breakeven price change")?,
            input.current_price,
            "breakeven price change",
        )?,
        dec!(100),
        "breakeven price change",
    )?;

    debug!(
        contracts = %total_contract_qty,
        average_entry = %new_average_entry,
        pnl = %unrealized_pnl,
        "Computed DCA outcome"
    );

    Ok(DcaResult {
        original_investment,
        dca_investment,
        total_investment,
        original_contract_qty,
        dca_contract_qty,
        total_contract_qty,
        new_average_entry,
        current_value,
        unrealized_pnl,
        roi_percentage,
        breakeven_price_change,
        leveraged_position,
    })
}
