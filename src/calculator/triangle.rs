//! DCA triangle solver.
//!
//! All three scenarios share the original position (entry price, leverage,
//! margin) and differ in which pair of {DCA amount, DCA price, resulting
//! average entry} is known. The unknown is solved in contract space.

use rust_decimal::Decimal;
use tracing::debug;

use super::{checked_add, checked_div, checked_mul, checked_sub, contract_qty};
use crate::error::CalcError;
use crate::models::{TriangleInput, TriangleResult, TriangleScenario, TriangleSolution};

/// Solve the unknown side of the triangle for the scenario carried by `input`.
///
/// Scenario 1 fails with [`CalcError::InvalidRatio`] when the target entry is
/// reachable without buying any additional contracts. Scenario 2 returns a
/// negative amount when the target is already overshot.
pub fn compute_triangle(input: &TriangleInput) -> Result<TriangleResult, CalcError> {
    let original_contract_qty = contract_qty(input.position_size, input.leverage, input.entry_price)?;

    let (solution, dca_amount) = match input.scenario {
        TriangleScenario::RequiredPrice {
            dca_amount,
            target_entry,
        } => {
            let total_cost = leveraged_cost(input, dca_amount)?;
            let total_contracts_needed = checked_div(total_cost, target_entry, "contracts needed")?;
            let additional_contracts_needed =
                checked_sub(total_contracts_needed, original_contract_qty, "contracts needed")?;
            if additional_contracts_needed.is_zero() {
                return Err(CalcError::InvalidRatio(
                    "target entry needs no additional contracts",
                ));
            }

            let required_price = checked_div(
                checked_mul(dca_amount, input.leverage, "required DCA price")?,
                additional_contracts_needed,
                "required DCA price",
            )?;
            (
                TriangleSolution::RequiredPrice {
                    required_price,
                    dca_amount,
                    target_entry,
                },
                dca_amount,
            )
        }

        TriangleScenario::RequiredAmount {
            current_price,
            target_entry,
        } => {
            let target_total_contracts = contract_qty(input.position_size, input.leverage, target_entry)?;
            let additional_contracts_needed =
                checked_sub(target_total_contracts, original_contract_qty, "contracts needed")?;

            let required_amount = checked_div(
                checked_mul(additional_contracts_needed, current_price, "required DCA amount")?,
                input.leverage,
                "required DCA amount",
            )?;
            if required_amount < Decimal::ZERO {
                debug!(
                    target = %target_entry,
                    amount = %required_amount,
                    "Target entry already overshot"
                );
            }
            (
                TriangleSolution::RequiredAmount {
                    required_amount,
                    current_price,
                    target_entry,
                },
                required_amount,
            )
        }

        TriangleScenario::ResultingEntry {
            current_price,
            dca_amount,
        } => {
            let dca_contract_qty = contract_qty(dca_amount, input.leverage, current_price)?;
            let total_contract_qty = checked_add(original_contract_qty, dca_contract_qty, "contract quantity")?;
            let total_cost = leveraged_cost(input, dca_amount)?;

            let resulting_entry = checked_div(total_cost, total_contract_qty, "resulting entry")?;
            (
                TriangleSolution::ResultingEntry {
                    resulting_entry,
                    current_price,
                    dca_amount,
                },
                dca_amount,
            )
        }
    };

    let total_investment = checked_add(input.position_size, dca_amount, "total investment")?;
    debug!(
        scenario = input.scenario.kind().tag(),
        total_investment = %total_investment,
        "Solved DCA triangle"
    );

    Ok(TriangleResult {
        solution,
        total_investment,
        leveraged_position: checked_mul(total_investment, input.leverage, "leveraged position")?,
    })
}

/// Original margin plus `dca_amount`, times leverage.
fn leveraged_cost(input: &TriangleInput, dca_amount: Decimal) -> Result<Decimal, CalcError> {
    let total_margin = checked_add(input.position_size, dca_amount, "total cost")?;
    checked_mul(total_margin, input.leverage, "total cost")
}
