//! Leveraged-position calculation engine.
//!
//! Every function here is pure: a typed input record in, a result record out,
//! no shared state. Inputs are expected to be strictly positive (the validator
//! guarantees it), but all arithmetic is still checked so a zero divisor or an
//! out-of-range product surfaces as a [`CalcError`] instead of a panic.
//!
//! Contracts, not dollars, average linearly: an entry of `margin` USD at
//! `price` under `leverage` buys `margin * leverage / price` contracts.

mod dca;
mod position;
mod target;
mod triangle;

pub use dca::compute_dca;
pub use position::{compute_position_metrics, FAVORABLE_RISK_REWARD};
pub use target::compute_target_dca;
pub use triangle::compute_triangle;

use rust_decimal::Decimal;

use crate::error::CalcError;

/// `numerator / denominator`. A zero divisor is `DivisionByZero`, a quotient
/// beyond Decimal range is `Overflow`.
fn checked_div(numerator: Decimal, denominator: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero(what));
    }
    numerator.checked_div(denominator).ok_or(CalcError::Overflow(what))
}

fn checked_mul(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    lhs.checked_mul(rhs).ok_or(CalcError::Overflow(what))
}

fn checked_add(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    lhs.checked_add(rhs).ok_or(CalcError::Overflow(what))
}

fn checked_sub(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    lhs.checked_sub(rhs).ok_or(CalcError::Overflow(what))
}

/// Contracts bought with `margin` USD at `price` under `leverage`.
fn contract_qty(margin: Decimal, leverage: Decimal, price: Decimal) -> Result<Decimal, CalcError> {
    let leveraged = checked_mul(margin, leverage, "contract quantity")?;
    checked_div(leveraged, price, "contract quantity")
}
