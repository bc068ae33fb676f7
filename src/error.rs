//! Error types for the calculation engine and the input validator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a calculation. All variants are recoverable: the caller
/// shows a message and waits for new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A ratio whose denominator is zero, e.g. a stop loss at the entry price.
    #[error("ratio is undefined: {0}")]
    InvalidRatio(&'static str),

    /// Zero divisor reached while computing the named quantity.
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),

    /// Result of the named quantity exceeds the representable decimal range.
    #[error("{0} is out of range")]
    Overflow(&'static str),

    #[error("unknown DCA triangle scenario {0} (expected 1, 2 or 3)")]
    UnknownScenario(u8),
}

/// Rejection of a raw input value, carrying the human field label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(String),

    #[error("{0} must be a valid number")]
    InvalidNumber(String),

    #[error("{0} must be greater than 0")]
    NotPositive(String),

    #[error("leverage must be one of the supported tiers, got {0}x")]
    UnsupportedLeverage(Decimal),

    #[error("order type must be 'long' or 'short', got '{0}'")]
    InvalidOrderType(String),
}
