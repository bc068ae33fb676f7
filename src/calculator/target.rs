//! Solving the DCA amount needed to move the average entry to a target.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{checked_add, checked_div, checked_mul, checked_sub, contract_qty};
use crate::error::CalcError;
use crate::models::{TargetDcaResult, TargetEntryInput};

/// Solve for the DCA amount that reaches `target_entry`.
///
/// The solved invariant keeps the original dollar base: the contracts needed
/// are what `position_size` would buy at the target price, and the shortfall
/// against the contracts actually held is bought at `current_price`.
///
/// A negative amount is returned as-is and means the target is already
/// overshot; see [`TargetDcaResult::is_target_overshot`].
pub fn compute_target_dca(input: &TargetEntryInput) -> Result<TargetDcaResult, CalcError> {
    let original_contract_qty = contract_qty(input.position_size, input.leverage, input.entry_price)?;
    let total_contracts_needed = contract_qty(input.position_size, input.leverage, input.target_entry)?;
    let additional_contracts_needed =
        checked_sub(total_contracts_needed, original_contract_qty, "contracts needed")?;

    let dca_amount_needed = checked_div(
        checked_mul(additional_contracts_needed, input.current_price, "DCA amount")?,
        input.leverage,
        "DCA amount",
    )?;

    let new_total_investment = checked_add(input.position_size, dca_amount_needed, "new total investment")?;
    let percentage_increase = checked_mul(
        checked_div(dca_amount_needed, input.position_size, "percentage increase")?,
        dec!(100),
        "percentage increase",
    )?;

    if dca_amount_needed < Decimal::ZERO {
        debug!(
            target = %input.target_entry,
            amount = %dca_amount_needed,
            "Target entry already overshot"
        );
    }

    Ok(TargetDcaResult {
        dca_amount_needed,
        new_total_investment,
        new_position_size: checked_mul(new_total_investment, input.leverage, "new position size")?,
        target_entry: input.target_entry,
        percentage_increase,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input(current_price: Decimal, target_entry: Decimal) -> TargetEntryInput {
        TargetEntryInput {
            entry_price: dec!(100),
            leverage: dec!(10),
            position_size: dec!(1000),
            current_price,
            target_entry,
        }
    }

    #[test]
    fn test_required_dca_for_lower_target() {
        let result = compute_target_dca(&make_input(dec!(80), dec!(90))).unwrap();
        let shown = result.rounded();

        assert_eq!(shown.dca_amount_needed.to_string(), "88.89");
        assert_eq!(shown.new_total_investment.to_string(), "1088.89");
        assert_eq!(shown.new_position_size.to_string(), "10888.89");
        assert_eq!(shown.target_entry.to_string(), "90.00");
        assert_eq!(shown.percentage_increase.to_string(), "8.89");
        assert!(!result.is_target_overshot());
    }

    #[test]
    fn test_overshot_target_returns_negative_amount() {
        let result = compute_target_dca(&make_input(dec!(80), dec!(110))).unwrap();

        assert!(result.is_target_overshot());
        assert_eq!(result.rounded().dca_amount_needed.to_string(), "-72.73");
        assert!(result.new_total_investment < dec!(1000));
    }

    #[test]
    fn test_target_at_entry_needs_nothing() {
        let result = compute_target_dca(&make_input(dec!(80), dec!(100))).unwrap();

        assert_eq!(result.dca_amount_needed, Decimal::ZERO);
        assert_eq!(result.new_total_investment, dec!(1000));
        assert_eq!(result.new_position_size, dec!(10000));
    }

    #[test]
    fn test_unreachable_target_is_overflow() {
        // Ten thousand leveraged dollars at 1e-28 is more contracts than Decimal holds
        let result = compute_target_dca(&make_input(dec!(80), dec!(0.0000000000000000000000000001)));
        assert_eq!(result, Err(CalcError::Overflow("contract quantity")));
    }

    #[test]
    fn test_tiny_target_dca_amount_overflows() {
        // Contracts fit, but buying them at the current price does not
        let mut input = make_input(dec!(79000000000000000000000000), dec!(0.001));
        input.leverage = dec!(1);
        assert_eq!(compute_target_dca(&input), Err(CalcError::Overflow("DCA amount")));
    }
}
